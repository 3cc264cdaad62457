//! binsave CLI
//!
//! Inspect and edit save files from the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use binsave::codec::{
    Ascii, Bool, Byte, Float32, Float64, Int16, Int32, Int64, UInt16, UInt32, UInt64, Utf16Be,
    Utf16Le, Utf32, Utf7, Utf8,
};
use binsave::{store, CodecError, Decoder, Encoder, SaveStore};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

/// binsave CLI
#[derive(Parser, Debug)]
#[command(name = "binsave-cli")]
#[command(about = "Inspect and edit binsave save files")]
#[command(version)]
struct Args {
    /// Save file path
    #[arg(short, long, default_value = binsave::config::DEFAULT_FILE_NAME)]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the save file if it does not exist
    Init,

    /// List every entry without modifying the file
    Dump {
        /// Decode every value as this type
        #[arg(long = "as", value_enum, default_value = "hex")]
        kind: ValueKind,
    },

    /// Print one value
    Get {
        /// The key to get
        key: String,

        /// How to decode the stored bytes
        #[arg(long = "as", value_enum, default_value = "hex")]
        kind: ValueKind,
    },

    /// Store one value and save
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// How to encode the value
        #[arg(long = "as", value_enum, default_value = "utf8")]
        kind: ValueKind,
    },

    /// Remove one key and save
    Remove {
        /// The key to remove
        key: String,
    },
}

/// Value interpretations, one per codec
#[derive(ValueEnum, Clone, Copy, Debug)]
enum ValueKind {
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Utf8,
    Utf16le,
    Utf16be,
    Utf32,
    Ascii,
    Utf7,
    Hex,
}

impl ValueKind {
    fn render(self, bytes: &[u8]) -> Result<String, CodecError> {
        Ok(match self {
            ValueKind::I16 => Int16.decode(bytes)?.to_string(),
            ValueKind::I32 => Int32.decode(bytes)?.to_string(),
            ValueKind::I64 => Int64.decode(bytes)?.to_string(),
            ValueKind::U8 => Byte.decode(bytes)?.to_string(),
            ValueKind::U16 => UInt16.decode(bytes)?.to_string(),
            ValueKind::U32 => UInt32.decode(bytes)?.to_string(),
            ValueKind::U64 => UInt64.decode(bytes)?.to_string(),
            ValueKind::F32 => Float32.decode(bytes)?.to_string(),
            ValueKind::F64 => Float64.decode(bytes)?.to_string(),
            ValueKind::Bool => Bool.decode(bytes)?.to_string(),
            ValueKind::Utf8 => Utf8.decode(bytes)?,
            ValueKind::Utf16le => Utf16Le.decode(bytes)?,
            ValueKind::Utf16be => Utf16Be.decode(bytes)?,
            ValueKind::Utf32 => Utf32.decode(bytes)?,
            ValueKind::Ascii => Ascii.decode(bytes)?,
            ValueKind::Utf7 => Utf7.decode(bytes)?,
            ValueKind::Hex => bytes.iter().map(|b| format!("{:02x}", b)).collect(),
        })
    }

    fn parse(self, text: &str) -> Result<Vec<u8>, String> {
        fn num<T: std::str::FromStr>(text: &str) -> Result<T, String>
        where
            T::Err: std::fmt::Display,
        {
            text.parse::<T>().map_err(|e| format!("invalid number {:?}: {}", text, e))
        }

        let encoded = match self {
            ValueKind::I16 => Int16.encode(&num::<i16>(text)?),
            ValueKind::I32 => Int32.encode(&num::<i32>(text)?),
            ValueKind::I64 => Int64.encode(&num::<i64>(text)?),
            ValueKind::U8 => Byte.encode(&num::<u8>(text)?),
            ValueKind::U16 => UInt16.encode(&num::<u16>(text)?),
            ValueKind::U32 => UInt32.encode(&num::<u32>(text)?),
            ValueKind::U64 => UInt64.encode(&num::<u64>(text)?),
            ValueKind::F32 => Float32.encode(&num::<f32>(text)?),
            ValueKind::F64 => Float64.encode(&num::<f64>(text)?),
            ValueKind::Bool => Bool.encode(&num::<bool>(text)?),
            ValueKind::Utf8 => Utf8.encode(text),
            ValueKind::Utf16le => Utf16Le.encode(text),
            ValueKind::Utf16be => Utf16Be.encode(text),
            ValueKind::Utf32 => Utf32.encode(text),
            ValueKind::Ascii => Ascii.encode(text),
            ValueKind::Utf7 => Utf7.encode(text),
            ValueKind::Hex => return parse_hex(text),
        };
        encoded.map_err(|e| e.to_string())
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    if text.len() % 2 != 0 {
        return Err(format!("hex value has odd length: {}", text.len()));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            text.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("invalid hex at offset {}", i))
        })
        .collect()
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let open = || SaveStore::open_path(&args.file).map_err(|e| e.to_string());

    // An existing file must read cleanly before it may be rewritten
    let open_for_write = || -> Result<SaveStore, String> {
        if args.file.exists() {
            store::read_file(&args.file).map_err(|e| {
                format!("refusing to modify {}: {}", args.file.display(), e)
            })?;
        }
        open()
    };

    match args.command {
        Commands::Dump { kind } => dump(&args.file, kind),
        Commands::Init => {
            let store = open()?;
            println!("{} ({} entries)", store.path().display(), store.len());
            Ok(())
        }
        Commands::Get { key, kind } => {
            let store = open()?;
            let bytes = store
                .get_raw(&key)
                .ok_or_else(|| format!("key not found: {}", key))?;
            println!("{}", kind.render(&bytes).map_err(|e| e.to_string())?);
            Ok(())
        }
        Commands::Set { key, value, kind } => {
            let bytes = kind.parse(&value)?;
            let store = open_for_write()?;
            store.set_raw(&key, bytes);
            store.save().map_err(|e| e.to_string())
        }
        Commands::Remove { key } => {
            let store = open_for_write()?;
            if store.remove(&key).is_none() {
                return Err(format!("key not found: {}", key));
            }
            store.save().map_err(|e| e.to_string())
        }
    }
}

/// Print a save file without creating or rewriting it
fn dump(path: &Path, kind: ValueKind) -> Result<(), String> {
    let (entries, stats) = store::read_file(path).map_err(|e| e.to_string())?;

    for (key, value) in &entries {
        let rendered = kind
            .render(value)
            .unwrap_or_else(|e| format!("<{}>", e));
        println!("{}\t{} bytes\t{}", key, value.len(), rendered);
    }

    println!(
        "-- {} of {} entries{}",
        stats.entries_decoded,
        stats.rows_declared,
        if stats.truncated { ", truncated" } else { "" }
    );
    Ok(())
}
