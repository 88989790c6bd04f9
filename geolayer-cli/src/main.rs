//! GeoLayer CLI - Command-line interface
//!
//! This binary provides a command-line interface to the geolayer library:
//! it loads GeoJSON files as layers, derives new layers with the geometry
//! operations, and writes the results back out as GeoJSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod runner;

use commands::{buffer, clip, difference, info, intersect, union};

#[derive(Parser)]
#[command(name = "geolayer")]
#[command(version)]
#[command(about = "Load GeoJSON layers and derive new ones with geometry operations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List input layers and run a reconciliation smoke pass
    Info {
        /// GeoJSON FeatureCollection files to load as layers
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Buffer a layer by a radius in meters
    Buffer {
        /// GeoJSON FeatureCollection files to load as layers
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Id of the layer to buffer (the file name of an input)
        #[arg(long)]
        layer: String,

        /// Buffer radius in meters; negative values erode polygons
        #[arg(long, allow_negative_numbers = true)]
        radius: f64,

        /// Name for the derived layer
        #[arg(long, default_value = "")]
        name: String,

        /// Output GeoJSON path
        #[arg(long, default_value = "buffer.geojson")]
        output: PathBuf,
    },

    /// Union the first features of two layers
    Union {
        /// GeoJSON FeatureCollection files to load as layers
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Id of the first layer
        #[arg(long)]
        first: String,

        /// Id of the second layer
        #[arg(long)]
        second: String,

        /// Name for the derived layer
        #[arg(long, default_value = "")]
        name: String,

        /// Output GeoJSON path
        #[arg(long, default_value = "union.geojson")]
        output: PathBuf,
    },

    /// Subtract one layer's first feature from another's
    Difference {
        /// GeoJSON FeatureCollection files to load as layers
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Id of the layer to subtract from
        #[arg(long)]
        base: String,

        /// Id of the layer to subtract
        #[arg(long)]
        subtract: String,

        /// Name for the derived layer
        #[arg(long, default_value = "")]
        name: String,

        /// Output GeoJSON path
        #[arg(long, default_value = "difference.geojson")]
        output: PathBuf,
    },

    /// Intersect two layers feature by feature
    Intersect {
        /// GeoJSON FeatureCollection files to load as layers
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Id of the first layer
        #[arg(long)]
        first: String,

        /// Id of the second layer
        #[arg(long)]
        second: String,

        /// Name for the derived layer
        #[arg(long, default_value = "")]
        name: String,

        /// Output GeoJSON path
        #[arg(long, default_value = "intersect.geojson")]
        output: PathBuf,
    },

    /// Clip target layers against a clip layer's first feature
    Clip {
        /// GeoJSON FeatureCollection files to load as layers
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Id of a target layer to clip (repeatable)
        #[arg(long = "target", required = true)]
        targets: Vec<String>,

        /// Id of the clip layer
        #[arg(long)]
        clip: String,

        /// Base name for the derived layers
        #[arg(long, default_value = "")]
        name: String,

        /// Directory for the output GeoJSON files
        #[arg(long, default_value = "clipped")]
        output_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { inputs } => info::run(info::InfoArgs { inputs }),
        Commands::Buffer {
            inputs,
            layer,
            radius,
            name,
            output,
        } => buffer::run(buffer::BufferArgs {
            inputs,
            layer,
            radius,
            name,
            output,
        }),
        Commands::Union {
            inputs,
            first,
            second,
            name,
            output,
        } => union::run(union::UnionArgs {
            inputs,
            first,
            second,
            name,
            output,
        }),
        Commands::Difference {
            inputs,
            base,
            subtract,
            name,
            output,
        } => difference::run(difference::DifferenceArgs {
            inputs,
            base,
            subtract,
            name,
            output,
        }),
        Commands::Intersect {
            inputs,
            first,
            second,
            name,
            output,
        } => intersect::run(intersect::IntersectArgs {
            inputs,
            first,
            second,
            name,
            output,
        }),
        Commands::Clip {
            inputs,
            targets,
            clip,
            name,
            output_dir,
        } => clip::run(clip::ClipArgs {
            inputs,
            targets,
            clip,
            name,
            output_dir,
        }),
    };

    if let Err(e) = result {
        e.exit();
    }
}
