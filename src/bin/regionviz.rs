use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use regionviz::viz::{self, Role};
use regionviz::{ChartConfig, Dashboard, storage};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "regionviz",
    version,
    about = "Render a bar-and-area chart per region, with region highlighting"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart (or the whole page) to .svg, .html or .png.
    Render(RenderArgs),
    /// List the filter buttons (reset first, then one per region).
    Regions(RegionsArgs),
    /// Write the dataset back out as CSV or JSON.
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    /// One element per mark, with accessibility roles.
    Annotated,
    /// Plain image drawn through plotters.
    Plotters,
}

#[derive(Args, Debug)]
struct ChartOpts {
    /// JSON config file (missing keys keep their defaults).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Use the 1800px-wide canvas.
    #[arg(long, default_value_t = false)]
    wide: bool,
    /// Number formatting locale (en, de, fr, es, it, pt, nl).
    #[arg(long)]
    locale: Option<String>,
    /// Label of the reset button.
    #[arg(long)]
    reset_label: Option<String>,
}

impl ChartOpts {
    fn resolve(&self) -> Result<ChartConfig> {
        let mut cfg = match &self.config {
            Some(path) => ChartConfig::load(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ChartConfig::default(),
        };
        if self.wide {
            cfg.width = regionviz::config::WIDE_WIDTH;
        }
        if let Some(w) = self.width {
            cfg.width = w;
        }
        if let Some(h) = self.height {
            cfg.height = h;
        }
        if let Some(l) = &self.locale {
            cfg.locale = l.clone();
        }
        if let Some(r) = &self.reset_label {
            cfg.reset_label = r.clone();
        }
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Dataset JSON (`{"label": {"id", "value_bar", "value_area"}}`).
    data: PathBuf,
    /// Output file (.svg, .html, .png).
    #[arg(long)]
    out: PathBuf,
    /// Highlight this region, as if its filter button was clicked.
    #[arg(long)]
    select: Option<String>,
    /// Click the bar at this index (selects its region).
    #[arg(long)]
    click_bar: Option<usize>,
    /// Hover the bar at this index; the tooltip shows in .html output.
    #[arg(long)]
    hover: Option<usize>,
    /// SVG writer; PNG always goes through plotters.
    #[arg(long, value_enum, default_value_t = Backend::Annotated)]
    backend: Backend,
    /// TTF font for text in bitmap output.
    #[arg(long)]
    font: Option<PathBuf>,
    #[command(flatten)]
    chart: ChartOpts,
}

#[derive(Args, Debug)]
struct RegionsArgs {
    data: PathBuf,
    /// Mark this region as selected.
    #[arg(long)]
    select: Option<String>,
    #[command(flatten)]
    chart: ChartOpts,
}

#[derive(Args, Debug)]
struct ExportArgs {
    data: PathBuf,
    /// Output file (.csv or .json).
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Regions(args) => cmd_regions(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load_dashboard(data: &Path, chart: &ChartOpts) -> Result<Dashboard> {
    let dataset = storage::load_dataset(data)
        .with_context(|| format!("loading dataset {}", data.display()))?;
    Ok(Dashboard::new(dataset, chart.resolve()?)?)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut dashboard = load_dashboard(&args.data, &args.chart)?;
    let font = args.font.clone().or_else(|| dashboard.config().font_path.clone());
    let bitmap_text = match &font {
        Some(path) => {
            viz::register_font_file(path)?;
            true
        }
        None => false,
    };

    if let Some(region) = &args.select {
        dashboard.select_region(region)?;
    }
    if let Some(index) = args.click_bar {
        dashboard.click_bar(index)?;
    }
    if let Some(index) = args.hover {
        let scene = dashboard
            .scene()
            .context("chart was not drawn")?;
        let (x, y) = scene
            .bar_center(index)
            .with_context(|| format!("no bar at index {index}"))?;
        dashboard.hover_bar(index, (x, y))?;
    }

    let scene = dashboard.scene().context("chart was not drawn")?;
    match (extension(&args.out).as_str(), args.backend) {
        ("html", _) => std::fs::write(&args.out, viz::render_page(&dashboard))?,
        ("svg", Backend::Annotated) => std::fs::write(&args.out, viz::render_svg(scene))?,
        ("svg", Backend::Plotters) | ("png", _) | ("bmp", _) | ("jpg", _) | ("jpeg", _) => {
            viz::export_image(scene, &args.out, bitmap_text)?
        }
        (other, _) => bail!("unsupported output format: {:?}", other),
    }

    let highlighted = scene.bars.iter().filter(|b| b.highlighted).count();
    eprintln!(
        "Wrote {} ({} bars, {} highlighted, {} x ticks)",
        args.out.display(),
        scene.bars.len(),
        highlighted,
        scene.axis(Role::XAxis).map_or(0, |a| a.ticks.len())
    );
    if let Some(tip) = dashboard.tooltip() {
        let lines =
            regionviz::tooltip::TooltipLines::for_point(&tip.point, &dashboard.config().locale);
        eprintln!("Tooltip: {} | {} | {}", lines.title, lines.bar, lines.area);
    }
    Ok(())
}

fn cmd_regions(args: RegionsArgs) -> Result<()> {
    let mut dashboard = load_dashboard(&args.data, &args.chart)?;
    if let Some(region) = &args.select {
        dashboard.select_region(region)?;
    }
    for button in dashboard.buttons() {
        let marker = if button.primary { "*" } else { " " };
        println!("[{}] {}", marker, button.label);
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let dataset = storage::load_dataset(&args.data)
        .with_context(|| format!("loading dataset {}", args.data.display()))?;
    match extension(&args.out).as_str() {
        "csv" => storage::save_csv(&dataset, &args.out)?,
        "json" => storage::save_json(&dataset, &args.out)?,
        other => bail!("unsupported format: {:?}", other),
    }
    eprintln!("Saved {} rows to {}", dataset.len(), args.out.display());
    Ok(())
}
