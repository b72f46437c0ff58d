use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use icon_styler::{IconConfig, StylePreset, UsvgValidator, process_svg_with_style, render_svg, style_svg};

/// Restyle an SVG icon as a neumorphic, glass, pixel-art or flat card.
#[derive(Debug, Parser)]
#[command(name = "icon-styler", version)]
struct Opts {
    /// Source SVG file, or `-` for stdin.
    input: PathBuf,

    /// Where to write the styled SVG. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Style config as JSON (camelCase fields). Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    style: Option<StylePreset>,

    /// Card size in pixels (square).
    #[arg(long)]
    size: Option<f32>,

    #[arg(long)]
    padding: Option<f32>,

    #[arg(long)]
    icon_color: Option<String>,

    #[arg(long)]
    background: Option<String>,

    /// Also rasterize the result to this PNG file.
    #[arg(long)]
    png: Option<PathBuf>,

    #[arg(long, default_value_t = 256)]
    png_size: u32,

    /// Fail instead of writing the fallback placeholder.
    #[arg(long)]
    strict: bool,
}

impl Opts {
    fn load_config(&self) -> Result<IconConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                IconConfig::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => IconConfig::default(),
        };

        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(size) = self.size {
            config.width = size;
            config.height = size;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if let Some(color) = &self.icon_color {
            config.icon_color = color.clone();
        }
        if let Some(color) = &self.background {
            config.background_color = color.clone();
        }
        Ok(config)
    }

    fn read_input(&self) -> Result<String> {
        if self.input.as_os_str() == "-" {
            let mut svg = String::new();
            io::stdin().read_to_string(&mut svg).context("reading stdin")?;
            return Ok(svg);
        }
        fs::read_to_string(&self.input).with_context(|| format!("reading {}", self.input.display()))
    }
}

fn main() -> Result<()> {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init();

    let opts = Opts::parse();
    let config = opts.load_config()?;
    let svg = opts.read_input()?;

    let styled = if opts.strict {
        style_svg(&svg, &config, &UsvgValidator)?
    } else {
        process_svg_with_style(&svg, &config)
    };

    match &opts.output {
        Some(path) => {
            fs::write(path, &styled).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{styled}"),
    }

    if let Some(path) = &opts.png {
        let Some(image) = render_svg(&styled, opts.png_size) else {
            bail!("could not rasterize styled SVG");
        };
        image
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
