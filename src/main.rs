use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vitrine::site::{Site, SiteOptions};
use vitrine::{config, loaders, output, path, route_data};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Route, locale and navigation core for a multilingual blog and portfolio")]
#[command(long_about = "\
Route, locale and navigation core for a multilingual blog and portfolio

The pages directory is the route layout. Locale directories hold
translations; pages missing from a locale are served from the default
locale as fallbacks.

Content structure:

  content/
  ├── config.toml            # Site config (optional)
  ├── i18n/                  # UI string overrides: <lang>.toml or <lang>.json
  └── pages/
      ├── index.md           # /
      ├── about.md           # /about/
      ├── _notes.md          # underscore prefix = ignored
      ├── guides/
      │   └── intro.md       # /guides/intro/
      └── es/
          └── about.md       # /es/about/ (translation)

Remote posts are read from a saved content API response with --posts.

Run 'vitrine gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Drop draft pages
    #[arg(long, global = true)]
    production: bool,

    /// Content API response (JSON) with posts to route under /posts/
    #[arg(long, global = true)]
    posts: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every route, fallbacks included
    Routes {
        /// Print static path descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print static path descriptors as JSON
    Paths,
    /// Show the navbar for a request path
    Nav {
        /// Request path
        #[arg(long, default_value = "/")]
        path: String,
        /// Locale key; derived from the path when omitted
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the page data for a request path as JSON
    Page {
        /// Request path
        path: String,
    },
    /// Group projects from a content API response (JSON)
    Projects {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Validate config, content and navbar without printing routes
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Routes { json } => {
            let site = load_site(&cli)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&site.routes.paths())?);
            } else {
                output::print_routes(&site);
            }
        }
        Command::Paths => {
            let site = load_site(&cli)?;
            println!("{}", serde_json::to_string_pretty(&site.routes.paths())?);
        }
        Command::Nav { path: pathname, locale, json } => {
            let site = load_site(&cli)?;
            let locale = match locale {
                Some(locale) => Some(locale.as_str()),
                None => site
                    .route_for_path(pathname)
                    .and_then(|route| route.locale())
                    .or_else(|| site.locales.slug_to_locale(path::strip_leading_and_trailing_slashes(pathname))),
            };
            let entries = site.nav_bar(pathname, locale)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                output::print_nav(pathname, &entries);
            }
        }
        Command::Page { path: pathname } => {
            let site = load_site(&cli)?;
            let route = site
                .route_for_path(pathname)
                .ok_or_else(|| format!("no route for \"{pathname}\""))?;
            let data = route_data::generate_route_data(&site, route, pathname)?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::Projects { file, json } => {
            let projects = loaders::parse_projects(&std::fs::read_to_string(file)?)?;
            let groups = loaders::group_projects(&projects);
            if *json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                let site = load_site(&cli)?;
                let ui = site.ui(&site.locales.default_locale().lang);
                output::print_projects(&groups, ui.t("projects.current"), ui.t("projects.past"));
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = load_site(&cli)?;
            site.check()?;
            output::print_check(&site, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the site from `--source`, adding posts from `--posts`.
fn load_site(cli: &Cli) -> Result<Site, Box<dyn std::error::Error>> {
    let extra_pages = match &cli.posts {
        Some(file) => read_posts(file)?,
        None => Vec::new(),
    };
    let options = SiteOptions {
        production: cli.production,
        extra_pages,
    };
    Ok(Site::load(&cli.source, options)?)
}

fn read_posts(file: &Path) -> Result<Vec<vitrine::types::PageEntry>, Box<dyn std::error::Error>> {
    let posts = loaders::parse_posts(&std::fs::read_to_string(file)?)?;
    log::info!("{} posts from {}", posts.len(), file.display());
    Ok(loaders::posts_to_pages(&posts))
}
