pub mod help;
pub mod inspect_image;
pub mod register;
pub mod set_channel;

use crate::data::State;
use color_eyre::eyre::Error;

/// Every command the framework knows about, in registration order.
pub fn all() -> Vec<poise::Command<State, Error>> {
    vec![
        help::help(),
        inspect_image::inspect_image(),
        register::register(),
        set_channel::set_channel(),
    ]
}
