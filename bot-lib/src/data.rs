use crate::config::Config;
use color_eyre::eyre::{Error, Result, WrapErr};
use mizuki_db::{MizukiDb, MonitoredChannels};
use mizuki_metadata::MetadataClient;
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;

/// The global state of the bot
pub type State = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Config file watcher that refreshes the config if it changes
    ///
    /// Attached to the AppState to keep the watcher alive
    _watcher: notify::RecommendedWatcher,
    pub monitored_channels: MonitoredChannels,
    /// Shared HTTP client for attachment downloads.
    pub metadata: MetadataClient,
}

impl AppState {
    pub fn new(
        config: Config,
        config_path: impl AsRef<Path>,
        db_path: impl AsRef<Path>,
    ) -> Result<AppState> {
        let config = Arc::new(RwLock::new(config));

        let db = MizukiDb::new(db_path)?;
        let monitored_channels = MonitoredChannels::new(&db)?;

        use notify::{
            Event, EventKind, RecursiveMode, Watcher,
            event::{AccessKind, AccessMode},
        };

        let config_clone = Arc::clone(&config);
        let config_path: Box<Path> = config_path.as_ref().into();
        let reload_config_path = config_path.clone();

        let mut watcher = notify::recommended_watcher(move |res| match res {
            Ok(Event {
                kind: EventKind::Access(AccessKind::Close(AccessMode::Write)),
                ..
            }) => {
                tracing::info!("config changed, reloading...");

                config_clone.blocking_write().reload(&reload_config_path);
            }
            Err(e) => tracing::error!("watch error: {:?}", e),
            _ => {}
        })
        .wrap_err("Failed to create file watcher")?;

        watcher
            .watch(&config_path, RecursiveMode::NonRecursive)
            .wrap_err("Failed to watch config file")?;

        Ok(AppState {
            config,
            _watcher: watcher,
            monitored_channels,
            metadata: MetadataClient::default(),
        })
    }
}

// User data, which is stored and accessible in all command invocations
pub type PoiseContext<'a> = poise::Context<'a, State, Error>;
