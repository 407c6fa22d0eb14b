use clap::{Parser, Subcommand};
use custom_pages::generate::{render_page_document, render_slot};
use custom_pages::select::find_page_by_slug;
use custom_pages::store::{JsonFileStore, load_pages};
use custom_pages::types::{Lang, Placement};
use custom_pages::{color, config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "custom-pages")]
#[command(about = "Render bilingual custom pages into site slots")]
#[command(long_about = "\
Render bilingual custom pages into site slots

Pages are read from the `customPages` array of a JSON settings document.
Each visible page with a placement is rendered into that slot of the public
site; every visible page also gets a standalone document under its slug.

Slots, in page order:

  after_header     after_services    before_packages
  after_team       before_work       after_work
  before_footer

Legacy records that only carry `displayLocation` (kebab-case) are converted
to `placement` on load and the settings document is saved back once.

Run 'custom-pages gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Settings document (overrides `settings_path` from the config)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which pages render in each slot
    Check {
        #[arg(long, value_parser = parse_lang)]
        lang: Option<Lang>,
    },
    /// Normalize legacy placements and save the settings document
    Migrate,
    /// Print the HTML fragment for one slot
    Render {
        #[arg(long, value_parser = parse_placement)]
        slot: Placement,
        #[arg(long, value_parser = parse_lang)]
        lang: Option<Lang>,
    },
    /// Print the standalone document for one page
    Page {
        slug: String,
        #[arg(long, value_parser = parse_lang)]
        lang: Option<Lang>,
    },
    /// Write slot fragments and standalone pages for every language
    Build {
        /// Output directory (overrides `output_dir` from the config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// WCAG contrast ratio of a text color on a background
    Contrast {
        background: String,
        /// Defaults to the better of black and white
        text: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Check { lang } => {
            let (site_config, store) = open_site(&cli)?;
            println!("==> Checking {}", store.path().display());
            let loaded = load_pages(&store);
            if loaded.did_migrate {
                println!("==> Legacy placements were normalized");
            }
            let lang = lang.unwrap_or(site_config.site.default_lang);
            output::print_check_output(&loaded.pages, lang);
        }
        Command::Migrate => {
            let (_, store) = open_site(&cli)?;
            let loaded = load_pages(&store);
            output::print_migrate_output(&loaded);
        }
        Command::Render { slot, lang } => {
            let (site_config, store) = open_site(&cli)?;
            let pages = load_pages(&store).pages;
            let lang = lang.unwrap_or(site_config.site.default_lang);
            let theme = site_config.hero.theme();
            if let Some(markup) = render_slot(&pages, slot, lang, &theme) {
                println!("{}", markup.into_string());
            }
        }
        Command::Page { ref slug, lang } => {
            let (site_config, store) = open_site(&cli)?;
            let pages = load_pages(&store).pages;
            let page = find_page_by_slug(&pages, slug)
                .ok_or_else(|| format!("no visible page with slug {slug:?}"))?;
            let lang = lang.unwrap_or(site_config.site.default_lang);
            let document = render_page_document(page, &pages, lang, &site_config);
            println!("{}", document.into_string());
        }
        Command::Build {
            output: ref output_override,
        } => {
            let (site_config, store) = open_site(&cli)?;
            let output_dir = output_override
                .clone()
                .unwrap_or_else(|| PathBuf::from(&site_config.output_dir));
            let pages = load_pages(&store).pages;
            println!("==> Generating HTML \u{2192} {}", output_dir.display());
            let report = generate::generate(&pages, &site_config, &output_dir)?;
            output::print_generate_output(&report, &pages);
            println!("==> Build complete: {}", output_dir.display());
        }
        Command::Contrast {
            ref background,
            ref text,
        } => {
            let recommended = color::best_text_color_bw(background);
            let text = text.as_deref().unwrap_or(recommended);
            let ratio = color::contrast_ratio(background, text)?;
            output::print_contrast_output(background, text, ratio, recommended);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the site config and open the settings document it points at.
fn open_site(cli: &Cli) -> Result<(config::SiteConfig, JsonFileStore), config::ConfigError> {
    let site_config = config::load_config(&cli.config)?;
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| PathBuf::from(&site_config.settings_path));
    Ok((site_config, JsonFileStore::new(settings_path)))
}

fn parse_lang(value: &str) -> Result<Lang, String> {
    Lang::parse(value).ok_or_else(|| format!("unknown language {value:?} (expected ar or en)"))
}

fn parse_placement(value: &str) -> Result<Placement, String> {
    let names: Vec<&str> = Placement::ALL.iter().map(|p| p.as_str()).collect();
    Placement::parse(value)
        .ok_or_else(|| format!("unknown slot {value:?} (expected one of {})", names.join(", ")))
}
