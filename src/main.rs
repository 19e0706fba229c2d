// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

const ASSETS_DIR: &str = "public";
const SOURCE_FILE: &str = "icon.svg";

/// A single icon target: a square pixel size and the file it is written to.
struct IconFile {
    size: u32,
    file_name: &'static str,
}

/// The fixed set of PWA icons produced from the logo.
///
/// The maskable variants are rendered exactly like the standard ones;
/// the web manifest only cares about the file names.
const ICONS: [IconFile; 4] = [
    IconFile { size: 192, file_name: "icon-192.png" },
    IconFile { size: 512, file_name: "icon-512.png" },
    IconFile { size: 192, file_name: "icon-maskable-192.png" },
    IconFile { size: 512, file_name: "icon-maskable-512.png" },
];

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "raster")]
fn timed<F, T>(perf: bool, name: &str, mut f: F) -> T
where
    F: FnMut() -> T,
{
    let now = std::time::Instant::now();
    let result = f();
    if perf {
        let elapsed = now.elapsed().as_micros() as f64 / 1000.0;
        println!("{}: {:.2}ms", name, elapsed);
    }

    result
}

fn process() -> Result<(), String> {
    let args = match collect_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e.to_string());
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let assets_dir = Path::new(ASSETS_DIR);
    let svg_path = assets_dir.join(SOURCE_FILE);
    if !svg_path.is_file() {
        return Err(format!("{} not found", svg_path.display()));
    }

    run(&args, assets_dir, &svg_path)
}

#[cfg(feature = "raster")]
const HELP: &str = "\
icongen converts the application's SVG logo into its PWA raster icons.

It reads public/icon.svg and writes icon-192.png, icon-512.png,
icon-maskable-192.png and icon-maskable-512.png next to it.
The public/ directory is expected to exist already.

USAGE:
  icongen [OPTIONS]

  icongen
  icongen --background '#ffffff'

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  --background COLOR            Sets the background color
                                Examples: red, #fff, #fff000
                                [default: transparent]

  --perf                        Prints performance stats
  --quiet                       Disables warnings
";

#[cfg(not(feature = "raster"))]
const HELP: &str = "\
icongen converts the application's SVG logo into its PWA raster icons.

This build was made without the 'raster' feature and cannot rasterize;
it only prints the manual conversion procedure for public/icon.svg.

USAGE:
  icongen [OPTIONS]

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  --quiet                       Disables warnings
";

#[derive(Debug)]
struct Args {
    #[cfg(feature = "raster")]
    background: Option<svgtypes::Color>,
    #[cfg(feature = "raster")]
    perf: bool,
    quiet: bool,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(Args {
        #[cfg(feature = "raster")]
        background: input.opt_value_from_str("--background")?,
        #[cfg(feature = "raster")]
        perf: input.contains("--perf"),
        quiet: input.contains("--quiet"),
    })
}

#[cfg(feature = "raster")]
fn run(args: &Args, assets_dir: &Path, svg_path: &Path) -> Result<(), String> {
    println!("Converting {} to PNG icons...", svg_path.display());

    // A conversion failure is not fatal: whatever was written stays on disk
    // and the operator gets the error text plus a hint.
    match convert(args, assets_dir, svg_path) {
        Ok(()) => {
            println!("All icons created successfully.");
        }
        Err(e) => {
            println!("Warning: icon conversion failed: {}.", e);
            println!(
                "Try reinstalling the tool with its rendering stack enabled: \
                 cargo install icongen"
            );
        }
    }

    Ok(())
}

#[cfg(feature = "raster")]
fn convert(args: &Args, assets_dir: &Path, svg_path: &Path) -> Result<(), String> {
    let svg_data = timed(args.perf, "Reading", || {
        std::fs::read(svg_path).map_err(|_| "failed to open the provided file")
    })?;

    let svg_string =
        std::str::from_utf8(&svg_data).map_err(|_| "provided data has not an UTF-8 encoding")?;

    let mut opt = usvg::Options {
        resources_dir: Some(assets_dir.to_path_buf()),
        ..Default::default()
    };

    // fontdb initialization is pretty expensive, so perform it only when
    // the logo actually contains text.
    if svg_string.contains("<text") {
        timed(args.perf, "FontDB", || opt.fontdb_mut().load_system_fonts());
    }

    let tree = timed(args.perf, "Parsing", || {
        usvg::Tree::from_str(svg_string, &opt).map_err(|e| e.to_string())
    })?;

    for icon in &ICONS {
        let img = timed(args.perf, "Rendering", || {
            render_icon(&tree, icon.size, args.background)
        })?;

        let out_path = assets_dir.join(icon.file_name);
        timed(args.perf, "Saving", || {
            img.save_png(&out_path).map_err(|e| e.to_string())
        })?;

        println!("Created {} ({}x{})", icon.file_name, icon.size, icon.size);
    }

    Ok(())
}

#[cfg(feature = "raster")]
fn render_icon(
    tree: &usvg::Tree,
    size: u32,
    background: Option<svgtypes::Color>,
) -> Result<tiny_skia::Pixmap, String> {
    let mut pixmap =
        tiny_skia::Pixmap::new(size, size).ok_or_else(|| "target size is zero".to_string())?;

    if let Some(background) = background {
        pixmap.fill(svg_to_skia_color(background));
    }

    resvg::render(tree, fit_transform(tree.size(), size), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Scales the drawing uniformly so it fits inside the `size` x `size` canvas
/// and centers it. Non-square sources get margins.
#[cfg(feature = "raster")]
fn fit_transform(src: usvg::Size, size: u32) -> tiny_skia::Transform {
    let size = size as f32;
    let scale = (size / src.width()).min(size / src.height());
    let tx = (size - src.width() * scale) / 2.0;
    let ty = (size - src.height() * scale) / 2.0;
    tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, tx, ty)
}

#[cfg(feature = "raster")]
fn svg_to_skia_color(color: svgtypes::Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}

#[cfg(not(feature = "raster"))]
fn run(_args: &Args, assets_dir: &Path, svg_path: &Path) -> Result<(), String> {
    println!("This build has no SVG rasterization support (the 'raster' feature is disabled).");
    print!("{}", fallback_instructions(assets_dir, svg_path));
    Ok(())
}

#[cfg(not(feature = "raster"))]
fn fallback_instructions(assets_dir: &Path, svg_path: &Path) -> String {
    let mut out = String::new();
    out.push_str("Manual fallback: use an online converter\n");
    out.push_str("  1. Go to: https://cloudconvert.com/svg-to-png\n");
    out.push_str(&format!("  2. Upload: {}\n", svg_path.display()));
    out.push_str(&format!("  3. Download {} versions:\n", ICONS.len()));
    for icon in &ICONS {
        out.push_str(&format!(
            "     - {}x{} -> {}\n",
            icon.size, icon.size, icon.file_name
        ));
    }
    out.push_str(&format!(
        "  4. Place all in the {}/ folder\n",
        assets_dir.display()
    ));
    out
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
