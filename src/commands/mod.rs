//! CLI command implementations.
//!
//! Every command that changes the register goes through [`update_register`]:
//! load, apply the whole command as one atomic mutation, save. A command that
//! fails part way leaves the file untouched.

pub mod catalog;
pub mod evaluate;
pub mod init;
pub mod modality;
pub mod project;
pub mod reassess;
pub mod risk;

use crate::config::RiskmapConfig;
use crate::errors;
use crate::io::{load_register, save_register};
use crate::register::RiskRegister;
use crate::session::SharedRegister;
use anyhow::Result;
use std::path::Path;

/// Paths and settings every command receives.
#[derive(Debug, Clone)]
pub struct CommandContext<'a> {
    pub register_path: &'a Path,
    pub config: &'a RiskmapConfig,
}

impl CommandContext<'_> {
    pub fn load(&self) -> Result<RiskRegister> {
        load_register(self.register_path, self.config.scoring_policy())
    }
}

pub fn update_register<T, F>(ctx: &CommandContext<'_>, f: F) -> Result<T>
where
    F: FnOnce(&mut RiskRegister) -> errors::Result<T>,
{
    let shared = SharedRegister::new(ctx.load()?);
    let value = shared.mutate(f)?;
    shared.read(|register| save_register(ctx.register_path, register))?;
    Ok(value)
}
