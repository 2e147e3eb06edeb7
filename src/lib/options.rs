//! Command-line options for choosing and configuring the duplicate-set strategy.
//!
//! [`UmiAwareOptions`] is meant to be composed into a duplicate-marking command with
//! `#[command(flatten)]`; the library itself has no binary.

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};

use crate::splitter::SplitConfig;
use crate::strategy::DuplicateSetStrategy;
use crate::validation::parse_tag;

/// How reads are grouped into duplicate sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DuplicateSetMode {
    /// Alignment position and orientation only
    Positional,
    /// Position and orientation, then split by UMI similarity
    #[default]
    UmiAware,
}

/// Options for UMI-aware duplicate-set formation.
#[derive(Debug, Clone, Args)]
pub struct UmiAwareOptions {
    /// Maximum number of mismatches for two UMIs to be joined directly
    #[arg(long = "edit-distance-to-join", default_value = "1")]
    pub edit_distance_to_join: u32,

    /// Write the most common UMI of each duplicate set to the inferred UMI tag
    #[arg(long = "add-inferred-umi", default_value = "false")]
    pub add_inferred_umi: bool,

    /// SAM tag holding the raw UMI
    #[arg(long = "umi-tag", default_value = "RX")]
    pub umi_tag: String,

    /// SAM tag receiving the inferred UMI
    #[arg(long = "inferred-umi-tag", default_value = "RI")]
    pub inferred_umi_tag: String,

    /// How duplicate sets are formed
    #[arg(long = "duplicate-set-strategy", value_enum, default_value_t = DuplicateSetMode::UmiAware)]
    pub duplicate_set_strategy: DuplicateSetMode,
}

impl Default for UmiAwareOptions {
    fn default() -> Self {
        Self {
            edit_distance_to_join: 1,
            add_inferred_umi: false,
            umi_tag: "RX".to_string(),
            inferred_umi_tag: "RI".to_string(),
            duplicate_set_strategy: DuplicateSetMode::UmiAware,
        }
    }
}

impl UmiAwareOptions {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either tag is not a letter followed by a letter or digit
    /// - The UMI tag and inferred UMI tag are the same
    pub fn validate(&self) -> Result<()> {
        parse_tag(&self.umi_tag, "umi-tag")?;
        parse_tag(&self.inferred_umi_tag, "inferred-umi-tag")?;
        if self.umi_tag == self.inferred_umi_tag {
            bail!("umi-tag and inferred-umi-tag must differ, both are '{}'", self.umi_tag);
        }
        Ok(())
    }

    /// Builds the splitting configuration from these options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail [`Self::validate`].
    pub fn split_config(&self) -> Result<SplitConfig> {
        self.validate()?;
        Ok(SplitConfig {
            edit_distance_to_join: self.edit_distance_to_join,
            add_inferred_umi: self.add_inferred_umi,
            umi_tag: parse_tag(&self.umi_tag, "umi-tag")?,
            inferred_umi_tag: parse_tag(&self.inferred_umi_tag, "inferred-umi-tag")?,
        })
    }

    /// Builds the duplicate-set strategy selected by these options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail [`Self::validate`].
    pub fn strategy(&self) -> Result<DuplicateSetStrategy> {
        let strategy = match self.duplicate_set_strategy {
            DuplicateSetMode::Positional => {
                self.validate()?;
                DuplicateSetStrategy::Positional
            }
            DuplicateSetMode::UmiAware => DuplicateSetStrategy::UmiAware(self.split_config()?),
        };
        log::info!("Using the {} duplicate-set strategy", strategy.name());
        Ok(strategy)
    }
}
