use std::path::PathBuf;

use bytestream_types::Endianness;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "bytestream",
    about = "Encode, decode and inspect bytestream wire data",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Codec configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a tag to its (low, high) identifier
    TagToId(TagToIdArgs),
    /// Render an identifier as a tag
    IdToTag(IdToTagArgs),
    /// Encode text as a compressed string frame
    Compress(CompressArgs),
    /// Decode a compressed string frame
    Decompress(DecompressArgs),
    /// Encode an integer as a varint
    VarintEncode(VarintEncodeArgs),
    /// Decode a varint from the front of a buffer
    VarintDecode(VarintDecodeArgs),
    /// Decode a buffer as a sequence of fields
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct TagToIdArgs {
    pub tag: String,
}

#[derive(Args)]
pub struct IdToTagArgs {
    pub low: u32,
    pub high: u32,
}

#[derive(Args)]
pub struct CompressArgs {
    pub text: String,
    /// zlib level, overriding the configured one
    #[arg(long)]
    pub level: Option<u32>,
}

#[derive(Args)]
pub struct DecompressArgs {
    /// Frame bytes as hex
    pub hex: String,
}

#[derive(Args)]
pub struct VarintEncodeArgs {
    #[arg(allow_negative_numbers = true)]
    pub value: String,
    /// Encode without zig-zag mapping
    #[arg(long)]
    pub unsigned: bool,
}

#[derive(Args)]
pub struct VarintDecodeArgs {
    pub hex: String,
    #[arg(long)]
    pub unsigned: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Buffer as hex
    pub hex: String,
    /// Comma-separated field kinds, read in order
    #[arg(long, short, value_delimiter = ',', required = true)]
    pub fields: Vec<FieldKind>,
    /// Byte order for multi-byte fields (be or le)
    #[arg(long, short, default_value = "be")]
    pub endian: Endianness,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int24,
    Uint24,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Varint,
    Uvarint,
    String,
    Compressed,
    LogicLong,
}
