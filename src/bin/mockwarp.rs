use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mockwarp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List mockup templates from the catalog.
    Templates(TemplatesArgs),
    /// Render a mockup preview PNG for one template.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct TemplatesArgs {
    /// Catalog JSON path; defaults to the bundled catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Filter by product type (e.g. "mug", "t-shirt").
    #[arg(long = "type")]
    product_type: Option<String>,

    /// Filter by exact category (case-sensitive).
    #[arg(long)]
    category: Option<String>,

    /// Case-insensitive substring search.
    #[arg(long)]
    search: Option<String>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Catalog JSON path; defaults to the bundled catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Template id, e.g. "mug-white-11oz".
    #[arg(long)]
    template: String,

    /// Design image PNG.
    #[arg(long)]
    design: PathBuf,

    /// Background photograph PNG. Defaults to the template's mockupImage
    /// path resolved relative to the current directory.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Templates(args) => cmd_templates(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<mockwarp::TemplateCatalog> {
    match path {
        Some(p) => {
            let json = std::fs::read_to_string(p)
                .with_context(|| format!("read catalog '{}'", p.display()))?;
            Ok(mockwarp::TemplateCatalog::from_json(&json)?)
        }
        None => Ok(mockwarp::TemplateCatalog::builtin()?),
    }
}

fn parse_product_type(s: &str) -> anyhow::Result<mockwarp::ProductType> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .with_context(|| format!("unknown product type '{s}'"))
}

fn cmd_templates(args: TemplatesArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;

    let filter = match (&args.product_type, &args.category, &args.search) {
        (Some(t), None, None) => Some(mockwarp::TemplateFilter::Type(parse_product_type(t)?)),
        (None, Some(c), None) => Some(mockwarp::TemplateFilter::Category(c.clone())),
        (None, None, Some(q)) => Some(mockwarp::TemplateFilter::Search(q.clone())),
        (None, None, None) => None,
        _ => anyhow::bail!("use at most one of --type, --category, --search"),
    };

    for t in catalog.list(filter.as_ref()) {
        let (rw, rh) = t.recommended_canvas_dimensions();
        println!(
            "{:<24} {:<13} {:<10} {}x{} design {}x{} curve {:.2} perspective {}",
            t.id, t.product_type, t.category, t.width, t.height, rw, rh, t.curve_intensity,
            t.perspective
        );
    }
    Ok(())
}

fn read_png(path: &Path) -> anyhow::Result<mockwarp::Raster> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(mockwarp::Raster::decode_png(&bytes)?)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let template = catalog.get(&args.template)?;

    let design = read_png(&args.design)?;
    let bg_path = args
        .background
        .clone()
        .unwrap_or_else(|| PathBuf::from(&template.mockup_image));
    let background = read_png(&bg_path)?;

    let preview =
        mockwarp::render_mockup_preview(template, &design, &background, args.width, args.height)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, preview.encode_png()?)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
