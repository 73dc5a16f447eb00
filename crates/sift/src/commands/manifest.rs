use std::path::PathBuf;

use clap::Subcommand;
use eyre::{Context, Result};
use sift_core::manifest::merge_manifest_file;

#[derive(Subcommand, Debug)]
#[command(infer_subcommands = true)]
pub enum Cmd {
    /// Regenerate the blog records of an index from the blog manifest
    Merge {
        /// Blog manifest listing every post
        #[arg(long, default_value = "blog-manifest.json")]
        manifest: PathBuf,

        /// Index file to update in place
        #[arg(long, default_value = "search.json")]
        index: PathBuf,

        /// Site root containing the rendered `blog/<slug>/` directories
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

impl Cmd {
    pub fn run(self) -> Result<()> {
        match self {
            Self::Merge {
                manifest,
                index,
                root,
            } => {
                let added = merge_manifest_file(&index, &manifest, &root)
                    .wrap_err("could not update search index")?;
                println!("Updated {}: added {added} blog posts", index.display());
                Ok(())
            }
        }
    }
}
