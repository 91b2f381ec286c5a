//! CLI argument definitions for Jarship.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

use jarship_core::properties::parse_cli_property;

#[derive(Parser, Debug)]
#[command(
    name = "jarship",
    version,
    about = "Build, sign and publish the saxon-6-5-5 Java library",
    long_about = "Jarship compiles the library, packages its primary, sources, javadoc and \
                  documentation jars, and publishes them to the local Maven repository or \
                  to Sonatype OSSRH."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set a project property (highest precedence)
    #[arg(
        short = 'P',
        long = "property",
        global = true,
        value_name = "KEY=VALUE",
        value_parser = parse_cli_property
    )]
    pub properties: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile and build all archives
    #[command(alias = "build")]
    Assemble,

    /// Publish the mavenJava publication
    Publish {
        /// Install into the local Maven repository
        #[arg(long, conflicts_with_all = ["close", "release"])]
        local: bool,
        /// Close the Sonatype staging repository after uploading
        #[arg(long)]
        close: bool,
        /// Close and release the Sonatype staging repository
        #[arg(long)]
        release: bool,
        /// Show the tasks that would run without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// List tasks
    Tasks {
        /// Include every task, not just lifecycle tasks
        #[arg(long)]
        all: bool,
    },

    /// Show the effective project properties
    Properties {
        /// Show secret values instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Remove the build directory
    Clean,

    /// Write a Jarship.toml for the saxon-6-5-5 library
    Init {
        /// Overwrite an existing Jarship.toml
        #[arg(long)]
        force: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
