use failure::Error;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;
use structopt::StructOpt;

use cc_tools::cc1;
use cc_tools::cc2;
use cc_tools::tws;

#[derive(StructOpt, Debug)]
#[structopt(name = "cc-cli")]
enum Opt {
    /// Print a summary of a CC1 `.dat` level pack, a CC2 `.c2m` level, or a
    /// `.tws` replay file.
    Info {
        #[structopt(parse(from_os_str))]
        file: PathBuf,

        #[structopt(long)]
        format: Option<Format>,
    },

    /// Parse a file and dump its in-memory representation as JSON.
    Dump {
        #[structopt(parse(from_os_str))]
        file: PathBuf,

        #[structopt(long)]
        format: Option<Format>,
    },

    /// Parse a CC1 `.dat` level pack and write it back out, byte for byte
    /// if the source round-trips cleanly.
    Roundtrip {
        #[structopt(parse(from_os_str))]
        input: PathBuf,

        #[structopt(parse(from_os_str))]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Dat,
    C2m,
    Tws,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dat" => Ok(Format::Dat),
            "c2m" => Ok(Format::C2m),
            "tws" => Ok(Format::Tws),
            other => Err(format!("unknown format {:?}; expected dat, c2m, or tws", other)),
        }
    }
}

impl Format {
    fn detect(path: &PathBuf) -> Result<Format, Error> {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ref e) if e == "dat" => Ok(Format::Dat),
            Some(ref e) if e == "c2m" => Ok(Format::C2m),
            Some(ref e) if e == "tws" => Ok(Format::Tws),
            _ => Err(failure::format_err!(
                "cannot infer format from extension of {:?}; pass --format explicitly",
                path
            )),
        }
    }
}

fn read_file(path: &PathBuf) -> Result<Vec<u8>, Error> {
    let mut f = File::open(path)?;
    let mut buffer = Vec::new();
    f.read_to_end(&mut buffer)?;
    Ok(buffer)
}

fn print_dat_info(bytes: &[u8]) -> Result<(), Error> {
    let levelset = cc1::dat::parse(bytes)?;
    println!(
        "DAT level pack: magic {:#010x}, {} level(s)",
        levelset.magic_number.unwrap_or(cc1::dat::DEFAULT_MAGIC_NUMBER),
        levelset.levels.len()
    );
    for (i, level) in levelset.levels.iter().enumerate() {
        println!(
            "  [{:3}] {:<30} time={:<5} chips={:<3} password={:<4} traps={} cloners={} movement={}",
            i + 1,
            level.title,
            level.time,
            level.chips,
            level.password,
            level.traps.len(),
            level.cloners.len(),
            level.movement.len(),
        );
    }
    Ok(())
}

fn print_c2m_info(bytes: &[u8]) -> Result<(), Error> {
    let level = cc2::section::parse_c2m(bytes)?;
    println!("C2M level:");
    if let Some(ref v) = level.file_version {
        println!("  format version: {}", v);
    }
    if let Some(ref t) = level.title {
        println!("  title: {}", t);
    }
    if let Some(ref a) = level.author {
        println!("  author: {}", a);
    }
    if let Some(time) = level.options.time {
        println!("  time limit: {}", time);
    }
    println!("  read-only: {}", level.read_only);

    let map_bytes = unpack_map(&level)?;
    if let Some(map_bytes) = map_bytes {
        let map = cc2::map::decode(&map_bytes)?;
        println!("  map: {}x{} ({} cells)", map.width, map.height, map.cells.len());
    } else {
        println!("  map: none");
    }
    Ok(())
}

fn print_tws_info(bytes: &[u8]) -> Result<(), Error> {
    let set = tws::parse(bytes)?;
    println!(
        "TWS replay set: ruleset={} last_visited_level={} {} record(s)",
        set.ruleset,
        set.last_visited_level,
        set.replays.len()
    );
    if let Some(ref name) = set.levelset_name {
        println!("  levelset: {}", name);
    }
    let mut formats: Vec<(&String, &usize)> = set.format_tally.iter().collect();
    formats.sort_by_key(|(k, _)| k.to_string());
    for (format, count) in formats {
        println!("  {}: {}", format, count);
    }
    Ok(())
}

/// Returns the decompressed `MAP ` body, preferring an already-unpacked
/// section and falling back to unpacking `PACK` if that's all the file has.
fn unpack_map(level: &cc2::C2mLevel) -> Result<Option<Vec<u8>>, Error> {
    if let Some(ref map) = level.map {
        return Ok(Some(map.clone()));
    }
    if let Some(ref packed) = level.packed_map {
        return Ok(Some(cc2::pack::unpack(packed)?));
    }
    Ok(None)
}

fn dump_json(file: &PathBuf, format: Format) -> Result<(), Error> {
    let bytes = read_file(file)?;
    let json = match format {
        Format::Dat => serde_json::to_string_pretty(&cc1::dat::parse(&bytes)?)?,
        Format::C2m => serde_json::to_string_pretty(&cc2::section::parse_c2m(&bytes)?)?,
        Format::Tws => serde_json::to_string_pretty(&tws::parse(&bytes)?)?,
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let opt = Opt::from_args();

    match opt {
        Opt::Info { file, format } => {
            let format = format.map(Ok).unwrap_or_else(|| Format::detect(&file))?;
            let bytes = read_file(&file)?;
            match format {
                Format::Dat => print_dat_info(&bytes),
                Format::C2m => print_c2m_info(&bytes),
                Format::Tws => print_tws_info(&bytes),
            }
        }
        Opt::Dump { file, format } => {
            let format = format.map(Ok).unwrap_or_else(|| Format::detect(&file))?;
            dump_json(&file, format)
        }
        Opt::Roundtrip { input, output } => {
            let bytes = read_file(&input)?;
            let levelset = cc1::dat::parse(&bytes)?;
            let rewritten = cc1::dat::write(&levelset)?;
            let mut f = File::create(&output)?;
            f.write_all(&rewritten)?;
            println!(
                "wrote {} bytes ({})",
                rewritten.len(),
                if rewritten == bytes { "byte-identical to source" } else { "differs from source" }
            );
            Ok(())
        }
    }
}
