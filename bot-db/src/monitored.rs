use crate::{MizukiDb, ReadWriteTree};
use color_eyre::eyre::{Context, Result};
use mizuki_traits::ForwardRefToTracing;
use poise::serenity_prelude::{ChannelId, UserId};
use serde::{Deserialize, Serialize};
use sled::Tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredChannel {
    pub added_by: u64,
}

impl MonitoredChannel {
    pub fn added_by(&self) -> UserId {
        UserId::new(self.added_by)
    }
}

/// Channels whose image posts get the inspect reaction.
#[derive(Debug, Clone)]
pub struct MonitoredChannels(Tree);

impl MonitoredChannels {
    pub fn new(db: &MizukiDb) -> Result<Self> {
        Ok(MonitoredChannels(db.open_tree("monitored_channels")?))
    }

    /// Returns false when the channel was already monitored. The first
    /// `added_by` is kept in that case.
    pub fn add(&self, channel_id: ChannelId, added_by: UserId) -> Result<bool> {
        let channel_id: u64 = channel_id.into();
        if self.0.typed_contains(&channel_id)? {
            return Ok(false);
        }

        let entry = MonitoredChannel {
            added_by: added_by.into(),
        };
        self.0.typed_insert(&channel_id, &entry)?;
        Ok(true)
    }

    pub fn remove(&self, channel_id: ChannelId) -> Result<bool> {
        let channel_id: u64 = channel_id.into();
        Ok(self
            .0
            .typed_remove::<u64, MonitoredChannel>(&channel_id)?
            .is_some())
    }

    /// Stops monitoring everything, returning how many channels were dropped.
    pub fn clear(&self) -> Result<usize> {
        let count = self.0.len();
        self.0.clear().wrap_err("Failed to clear monitored channels")?;
        Ok(count)
    }

    pub fn contains(&self, channel_id: ChannelId) -> Result<bool> {
        let channel_id: u64 = channel_id.into();
        self.0.typed_contains(&channel_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, MonitoredChannel)> {
        self.0
            .iter()
            .filter_map(|entry| entry.trace_err_ok())
            .filter_map(|(channel_id, entry)| -> Option<(ChannelId, MonitoredChannel)> {
                let channel_id: u64 = bincode::deserialize(&channel_id).trace_err_ok()?;
                let entry: MonitoredChannel = bincode::deserialize(&entry).trace_err_ok()?;
                Some((ChannelId::new(channel_id), entry))
            })
    }
}
