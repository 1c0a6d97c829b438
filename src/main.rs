use blogsmith::build::Site;
use blogsmith::{optimize, output, watch};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "blogsmith")]
#[command(about = "Static blog generator: Markdown articles to HTML, index and sitemap")]
#[command(long_about = "\
Static blog generator: Markdown articles to HTML, index and sitemap

Project layout (all paths configurable in blog.toml):

  .
  ├── blog.toml                 # Optional settings
  ├── articles/
  │   ├── hello-world.md        # Source (front matter + Markdown)
  │   └── hello-world.html      # Generated page
  ├── templates/                # Optional overrides
  │   ├── article.html
  │   └── blog-index.html
  ├── Photo/                    # Source tree for --optimize-images
  │   └── optimized/            # Generated copies
  ├── blog.html                 # Generated index, newest first
  └── sitemap.xml               # Generated

Front matter keys: title, description, date, author, tags, image, slug.")]
#[command(version = version_string())]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Build once, then rebuild whenever an article changes
    #[arg(long, conflicts_with = "optimize_images")]
    watch: bool,

    /// Optimize every image under the photo directory, then exit
    #[arg(long)]
    optimize_images: bool,
}

/// `RUST_LOG` when set and valid, `info` otherwise.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_target(false)
        .init();

    let mut site = Site::load(&cli.root)?;

    if cli.optimize_images {
        let optimizer = optimize::default_optimizer();
        let report = site.optimize_images(optimizer.as_ref());
        output::print_batch_report(&report);
    } else if cli.watch {
        watch::watch(&mut site)?;
    } else {
        let report = site.build_once()?;
        output::print_build_report(&report, site.root());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("  ")).to_string(), "info");
    }

    #[test]
    fn rust_log_overrides_default_level() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(log_filter(Some("blogsmith=trace")).to_string(), "blogsmith=trace");
    }

    #[test]
    fn watch_conflicts_with_optimize_images() {
        assert!(Cli::try_parse_from(["blogsmith", "--watch", "--optimize-images"]).is_err());
        let cli = Cli::try_parse_from(["blogsmith", "--root", "site", "--watch"]).unwrap();
        assert!(cli.watch);
        assert_eq!(cli.root, PathBuf::from("site"));
    }
}
