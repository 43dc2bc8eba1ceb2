// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use clap::{Parser, command};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the file containing the settings you want to use (json, yaml or toml)
    #[arg(short, long, default_value_t = String::default())]
    pub file_path: String,

    /// Bulean to indicate whether you want to use the environment variables as a configuration (file_path compatible)
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub env_config: bool,
}
