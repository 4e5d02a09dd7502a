use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use driftgen::config::Params;
use driftgen::render;

fn prompt(label: &str) -> io::Result<String> {
    eprint!("Enter {label} of the terrain: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn dimension(arg: Option<&String>, label: &str) -> driftgen::Result<usize> {
    let text = match arg {
        Some(s) => s.clone(),
        None => prompt(label)?,
    };
    driftgen::error::parse_dimension(&text, label)
}

fn run() -> driftgen::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let height = dimension(args.get(1), "height")?;
    let width = dimension(args.get(2), "width")?;
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(42);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    let params = match args.get(5) {
        Some(p) => Params::from_json_file(&PathBuf::from(p))?,
        None => Params::default(),
    };

    std::fs::create_dir_all(&out_dir)?;

    let (terrain, timings) = driftgen::generate(seed, height, width, &params)?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let save = |name: &str, rgba: &[u8]| -> driftgen::Result<()> {
        let path = out_dir.join(name);
        image::save_buffer(
            &path,
            rgba,
            terrain.w as u32,
            terrain.h as u32,
            image::ColorType::Rgba8,
        )?;
        log::info!("saved {}", path.display());
        Ok(())
    };

    save("terrain.png", &render::render_terrain(&terrain.shaped))?;
    save("land.png", &render::render_terrain(&terrain.land))?;
    save("heightmap.png", &render::render_heightmap(&terrain.raw))?;

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
