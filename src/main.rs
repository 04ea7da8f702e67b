use clap::{Parser, Subcommand};
use course_index::browser::{Action, Browser, FsSource, Library, Screen, SectionKind};
use course_index::catalog::{self, Catalog};
use course_index::{output, scan};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; version_string runs at most once per process
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "course-index")]
#[command(about = "Build and browse the file index of a markdown course site")]
#[command(long_about = "\
Build and browse the file index of a markdown course site

Run without arguments to scan the category directories of the built-in
catalog and write index.json. Each category is a flat directory of .md
files; its id has the form <group>-<section>.

Directory structure (stock catalog):

  assets/
  ├── semester-1/
  │   ├── lessons/          # semester1-lessons      (sorted by number)
  │   │   ├── lesson_1.md
  │   │   └── lesson_10.md
  │   ├── assignments/      # semester1-assignments
  │   └── exam/             # semester1-exam         (explicit order)
  │       └── tickets.md
  └── semester-2/
      └── ...

Display names (first available wins):
  names override → pattern (lesson_7.md → \"Lesson 7\") → filename without .md

A missing category directory is a warning, not an error.

Run 'course-index gen-catalog' to print the built-in catalog.")]
#[command(version = version_string())]
struct Cli {
    /// Project root [default: the catalog's root]
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Catalog file to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the category directories and write the index (the default)
    Build,
    /// Scan and list what the index would contain, without writing it
    Check,
    /// Show the semester → section → file tree from the written index
    Browse,
    /// Render one file from the index as HTML
    Read {
        /// Group id, e.g. `semester1`
        group: String,
        /// Section: lessons, assignments, exam or other
        section: String,
        /// 1-based position in the section's file list
        number: NonZeroUsize,
    },
    /// Print the built-in catalog
    GenCatalog,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let catalog = load_catalog(cli.catalog.as_deref(), cli.root.as_deref())?;
            let manifest = scan::build_manifest(&catalog, &mut output::print_scan_event)?;
            let manifest_path = catalog.output_path();
            scan::write_manifest(&manifest_path, &manifest)?;
            output::print_saved(&manifest_path);
        }
        Command::Check => {
            let catalog = load_catalog(cli.catalog.as_deref(), cli.root.as_deref())?;
            let manifest = scan::build_manifest(&catalog, &mut output::print_scan_event)?;
            println!();
            output::print_manifest_summary(&manifest);
        }
        Command::Browse => {
            let catalog = load_catalog(cli.catalog.as_deref(), cli.root.as_deref())?;
            let library = load_library(&catalog);
            output::print_library(&library);
        }
        Command::Read {
            group,
            section,
            number,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref(), cli.root.as_deref())?;
            let library = load_library(&catalog);
            let browser = Browser::new(&library, FsSource::new(&catalog.root));

            let kind = SectionKind::from_token(Some(section.as_str()));
            let screen = [
                Action::OpenGroup(group.clone()),
                Action::OpenSection(kind),
                Action::OpenFile(number.get() - 1),
            ]
            .into_iter()
            .fold(Screen::Groups, |screen, action| browser.apply(&screen, action));

            if !matches!(screen, Screen::Content { .. }) {
                return Err(format!("no file {number} in {group}/{kind}").into());
            }
            output::print_view(&browser.view(&screen));
        }
        Command::GenCatalog => {
            print!("{}", catalog::stock_catalog_toml());
        }
    }

    Ok(())
}

/// The `--catalog` file if given, else the built-in catalog; `--root` wins over either.
fn load_catalog(
    path: Option<&Path>,
    root: Option<&Path>,
) -> Result<Catalog, catalog::CatalogError> {
    let mut catalog = match path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::stock()?,
    };
    if let Some(root) = root {
        catalog.root = root.to_path_buf();
    }
    Ok(catalog)
}

/// Read the written index; an unreadable one browses as empty.
fn load_library(catalog: &Catalog) -> Library {
    Library::load_or_empty(&catalog.output_path(), &catalog.groups, |e| {
        eprintln!("warning: cannot load index: {e}");
    })
}
