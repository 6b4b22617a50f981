//! Configuration module.

mod settings;

pub use settings::{
    OutputSettings, Settings, SettingsError, SourceSettings, TargetConfig,
};
