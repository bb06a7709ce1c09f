use std::fmt;
use std::path::Path;

use anyhow::{bail, Context};
use bytestream_codec::{
    varint, ByteCursor, ByteSink, CodecConfig, CodecResult, Endianness, LogicLong, TagBridge,
};
use bytestream_tag::HashtagBridge;
use bytestream_types::PackedBool;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let report = match cli.command {
        Command::TagToId(args) => Report::Id(cmd_tag_to_id(&args)?),
        Command::IdToTag(args) => Report::Id(cmd_id_to_tag(&args)?),
        Command::Compress(args) => Report::Frame(cmd_compress(&args, &config)?),
        Command::Decompress(args) => Report::Text(cmd_decompress(&args, &config)?),
        Command::VarintEncode(args) => Report::Varint(cmd_varint_encode(&args)?),
        Command::VarintDecode(args) => Report::Varint(cmd_varint_decode(&args)?),
        Command::Inspect(args) => Report::Inspect(cmd_inspect(&args, &config)?),
    };
    match cli.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CodecConfig> {
    let Some(path) = path else {
        return Ok(CodecConfig::default());
    };
    let config = CodecConfig::load(path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    debug!(path = %path.display(), long_width = %config.long_width, "config loaded");
    Ok(config)
}

/// Hex input with optional `0x` prefix and embedded whitespace.
fn parse_hex(input: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).with_context(|| format!("invalid hex input {input:?}"))
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Id(IdReport),
    Frame(FrameReport),
    Text(TextReport),
    Varint(VarintReport),
    Inspect(InspectReport),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(r) => r.fmt(f),
            Self::Frame(r) => r.fmt(f),
            Self::Text(r) => r.fmt(f),
            Self::Varint(r) => r.fmt(f),
            Self::Inspect(r) => r.fmt(f),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct IdReport {
    pub tag: String,
    pub low: u32,
    pub high: u32,
    pub descriptor: String,
}

impl IdReport {
    fn new(tag: String, id: LogicLong) -> Self {
        Self {
            tag,
            low: id.low,
            high: id.high,
            descriptor: id.descriptor(),
        }
    }
}

impl fmt::Display for IdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tag.yellow().bold(), self.descriptor.cyan())
    }
}

#[derive(Debug, Serialize)]
pub struct FrameReport {
    pub decompressed_len: usize,
    pub compressed_len: usize,
    pub frame: String,
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} bytes -> {} bytes",
            "compressed".green(),
            self.decompressed_len,
            self.compressed_len
        )?;
        write!(f, "{}", self.frame)
    }
}

#[derive(Debug, Serialize)]
pub struct TextReport {
    pub text: String,
    pub consumed: usize,
}

impl fmt::Display for TextReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.text)?;
        write!(f, "{}", format!("({} bytes consumed)", self.consumed).dimmed())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Signed(i64),
    Unsigned(u64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signed(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VarintReport {
    pub value: Number,
    pub hex: String,
    pub len: usize,
}

impl fmt::Display for VarintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} ({} bytes)",
            self.value.to_string().bold(),
            self.hex.cyan(),
            self.len
        )
    }
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub endian: Endianness,
    pub fields: Vec<FieldReport>,
    pub trailing: usize,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            let kind = field
                .kind
                .to_possible_value()
                .map(|v| v.get_name().to_owned())
                .unwrap_or_default();
            writeln!(
                f,
                "{:>6}  {:<20} {}",
                field.offset.to_string().dimmed(),
                kind.cyan(),
                field.value
            )?;
        }
        if self.trailing > 0 {
            write!(f, "{} {} trailing bytes", "!".yellow().bold(), self.trailing)
        } else {
            write!(f, "{} all bytes consumed", "✓".green())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FieldReport {
    pub offset: usize,
    pub kind: FieldKind,
    pub value: FieldValue,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(PackedBool),
    Number(Number),
    Text(String),
    Id(IdReport),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{} (count {})", b.value, b.count),
            Self::Number(n) => n.fmt(f),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Id(id) => write!(f, "{} {}", id.tag, id.descriptor),
        }
    }
}

fn cmd_tag_to_id(args: &TagToIdArgs) -> anyhow::Result<IdReport> {
    let bridge = HashtagBridge::new();
    let id = bridge.tag_to_id(&args.tag)?;
    let tag = bridge.id_to_tag(id)?;
    Ok(IdReport::new(tag, id))
}

fn cmd_id_to_tag(args: &IdToTagArgs) -> anyhow::Result<IdReport> {
    let id = LogicLong::new(args.low, args.high);
    let tag = HashtagBridge::new().id_to_tag(id)?;
    Ok(IdReport::new(tag, id))
}

fn cmd_compress(args: &CompressArgs, config: &CodecConfig) -> anyhow::Result<FrameReport> {
    let mut config = config.clone();
    if let Some(level) = args.level {
        config = config.with_compression_level(level);
        config.validate()?;
    }
    let mut sink = ByteSink::with_config(config);
    sink.write_compressed_string(&args.text)?;
    let frame = sink.freeze();
    Ok(FrameReport {
        decompressed_len: args.text.len(),
        compressed_len: frame.len() - 2 * bytestream_codec::sizes::STRING_LENGTH_SIZE,
        frame: hex::encode(&frame),
    })
}

fn cmd_decompress(args: &DecompressArgs, config: &CodecConfig) -> anyhow::Result<TextReport> {
    let data = parse_hex(&args.hex)?;
    let mut cursor = ByteCursor::with_config(&data, config.clone());
    let text = cursor.read_compressed_string()?;
    Ok(TextReport {
        text,
        consumed: cursor.position(),
    })
}

fn cmd_varint_encode(args: &VarintEncodeArgs) -> anyhow::Result<VarintReport> {
    let mut sink = ByteSink::new();
    let value = if args.unsigned {
        let v: u64 = args
            .value
            .parse()
            .with_context(|| format!("not an unsigned 64-bit integer: {}", args.value))?;
        sink.write_uvarint(v)?;
        Number::Unsigned(v)
    } else {
        let v: i64 = args
            .value
            .parse()
            .with_context(|| format!("not a signed 64-bit integer: {}", args.value))?;
        sink.write_varint(v)?;
        Number::Signed(v)
    };
    Ok(VarintReport {
        value,
        hex: hex::encode(sink.as_slice()),
        len: sink.len(),
    })
}

fn cmd_varint_decode(args: &VarintDecodeArgs) -> anyhow::Result<VarintReport> {
    let data = parse_hex(&args.hex)?;
    let (raw, len) = varint::decode_uvarint(&data)?;
    let value = if args.unsigned {
        Number::Unsigned(raw)
    } else {
        Number::Signed(varint::zigzag_decode(raw))
    };
    Ok(VarintReport {
        value,
        hex: hex::encode(&data[..len]),
        len,
    })
}

fn cmd_inspect(args: &InspectArgs, config: &CodecConfig) -> anyhow::Result<InspectReport> {
    if args.fields.is_empty() {
        bail!("no fields to read");
    }
    let data = parse_hex(&args.hex)?;
    let bridge = HashtagBridge::new();
    let mut cursor = ByteCursor::with_config(&data, config.clone());
    let mut fields = Vec::with_capacity(args.fields.len());
    for (index, &kind) in args.fields.iter().enumerate() {
        let offset = cursor.position();
        let value = read_field(&mut cursor, kind, args.endian, &bridge)
            .with_context(|| format!("field {index} ({kind:?}) at offset {offset}"))?;
        debug!(offset, ?kind, "field decoded");
        fields.push(FieldReport {
            offset,
            kind,
            value,
        });
    }
    Ok(InspectReport {
        endian: args.endian,
        fields,
        trailing: cursor.remaining(),
    })
}

fn read_field(
    cursor: &mut ByteCursor<'_>,
    kind: FieldKind,
    e: Endianness,
    bridge: &dyn TagBridge,
) -> CodecResult<FieldValue> {
    use FieldValue::{Bool, Number as Num, Text};
    use Number::{Signed, Unsigned};

    Ok(match kind {
        FieldKind::Bool => Bool(cursor.read_bool()?),
        FieldKind::Int8 => Num(Signed(cursor.read_int8()?.into())),
        FieldKind::Uint8 => Num(Unsigned(cursor.read_uint8()?.into())),
        FieldKind::Int16 => Num(Signed(cursor.read_int16(e)?.into())),
        FieldKind::Uint16 => Num(Unsigned(cursor.read_uint16(e)?.into())),
        FieldKind::Int24 => Num(Signed(cursor.read_int24(e)?.into())),
        FieldKind::Uint24 => Num(Unsigned(cursor.read_uint24(e)?.into())),
        FieldKind::Int32 => Num(Signed(cursor.read_int32(e)?.into())),
        FieldKind::Uint32 => Num(Unsigned(cursor.read_uint32(e)?.into())),
        FieldKind::Int64 => Num(Signed(cursor.read_int64(e)?)),
        FieldKind::Uint64 => Num(Unsigned(cursor.read_uint64(e)?)),
        FieldKind::Long => Num(Signed(cursor.read_long(e)?)),
        FieldKind::UnsignedLong => Num(Unsigned(cursor.read_unsigned_long(e)?)),
        FieldKind::LongLong => Num(Signed(cursor.read_longlong(e)?)),
        FieldKind::UnsignedLongLong => Num(Unsigned(cursor.read_unsigned_longlong(e)?)),
        FieldKind::Varint => Num(Signed(cursor.read_varint()?)),
        FieldKind::Uvarint => Num(Unsigned(cursor.read_uvarint()?)),
        FieldKind::String => Text(cursor.read_string()?),
        FieldKind::Compressed => Text(cursor.read_compressed_string()?),
        FieldKind::LogicLong => {
            let resolved = cursor.read_logic_long(e, bridge)?;
            FieldValue::Id(IdReport::new(resolved.tag, resolved.id))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytestream_types::LongWidth;

    fn inspect(hex: &str, fields: &[FieldKind], endian: Endianness) -> anyhow::Result<InspectReport> {
        let args = InspectArgs {
            hex: hex.into(),
            fields: fields.to_vec(),
            endian,
        };
        cmd_inspect(&args, &CodecConfig::default())
    }

    #[test]
    fn tag_to_id_normalises() {
        let report = cmd_tag_to_id(&TagToIdArgs { tag: "8ggl".into() }).unwrap();
        assert_eq!(report.tag, "#8GGL");
        assert_eq!((report.low, report.high), (6, 28));
        assert_eq!(report.descriptor, "(6, 28)");
    }

    #[test]
    fn tag_to_id_rejects_bad_symbol() {
        assert!(cmd_tag_to_id(&TagToIdArgs { tag: "#ABC".into() }).is_err());
    }

    #[test]
    fn id_to_tag_renders() {
        let report = cmd_id_to_tag(&IdToTagArgs { low: 0, high: 1 }).unwrap();
        assert_eq!(report.tag, "#2PP");
        assert!(cmd_id_to_tag(&IdToTagArgs { low: 256, high: 0 }).is_err());
    }

    #[test]
    fn compress_then_decompress() {
        let config = CodecConfig::default();
        let frame = cmd_compress(
            &CompressArgs {
                text: "abcdefghijklmnopqrstuvwxyz1234567890".into(),
                level: None,
            },
            &config,
        )
        .unwrap();
        assert_eq!(frame.decompressed_len, 36);
        assert!(frame.frame.starts_with(&format!("{:08x}24000000789c", frame.compressed_len)));

        let text = cmd_decompress(&DecompressArgs { hex: frame.frame.clone() }, &config).unwrap();
        assert_eq!(text.text, "abcdefghijklmnopqrstuvwxyz1234567890");
        assert_eq!(text.consumed * 2, frame.frame.len());
    }

    #[test]
    fn compress_rejects_bad_level() {
        let args = CompressArgs {
            text: "x".into(),
            level: Some(12),
        };
        assert!(cmd_compress(&args, &CodecConfig::default()).is_err());
    }

    #[test]
    fn decompress_known_frame() {
        // "ab" as produced by another writer
        let frame = "0000000e02000000789c4a4c020400 00ffff012600c4";
        let text = cmd_decompress(&DecompressArgs { hex: frame.into() }, &CodecConfig::default())
            .unwrap();
        assert_eq!(text.text, "ab");
        assert_eq!(text.consumed, 22);
    }

    #[test]
    fn varint_encode_signed_and_unsigned() {
        let signed = cmd_varint_encode(&VarintEncodeArgs {
            value: "-65".into(),
            unsigned: false,
        })
        .unwrap();
        assert_eq!(signed.hex, "8101");
        assert_eq!(signed.value, Number::Signed(-65));

        let unsigned = cmd_varint_encode(&VarintEncodeArgs {
            value: "300".into(),
            unsigned: true,
        })
        .unwrap();
        assert_eq!(unsigned.hex, "ac02");
        assert_eq!(unsigned.len, 2);

        assert!(cmd_varint_encode(&VarintEncodeArgs {
            value: "-1".into(),
            unsigned: true,
        })
        .is_err());
    }

    #[test]
    fn varint_decode_reports_prefix() {
        let report = cmd_varint_decode(&VarintDecodeArgs {
            hex: "0xac02ff".into(),
            unsigned: true,
        })
        .unwrap();
        assert_eq!(report.value, Number::Unsigned(300));
        assert_eq!(report.hex, "ac02");

        let signed = cmd_varint_decode(&VarintDecodeArgs {
            hex: "01".into(),
            unsigned: false,
        })
        .unwrap();
        assert_eq!(signed.value, Number::Signed(-1));
        assert!(cmd_varint_decode(&VarintDecodeArgs {
            hex: "80".into(),
            unsigned: false,
        })
        .is_err());
    }

    #[test]
    fn inspect_field_sequence() {
        let report = inspect(
            "03 fffe 00000005 68656c6c6f 0000000000000001",
            &[
                FieldKind::Bool,
                FieldKind::Int16,
                FieldKind::String,
                FieldKind::LogicLong,
            ],
            Endianness::Big,
        )
        .unwrap();
        assert_eq!(report.trailing, 0);
        let offsets: Vec<usize> = report.fields.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, [0, 1, 3, 12]);
        assert_eq!(report.fields[0].value, FieldValue::Bool(PackedBool::new(true, 3)));
        assert_eq!(report.fields[1].value, FieldValue::Number(Number::Signed(-2)));
        assert_eq!(report.fields[2].value, FieldValue::Text("hello".into()));
        match &report.fields[3].value {
            FieldValue::Id(id) => assert_eq!(id.tag, "#2PP"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn inspect_little_endian_and_trailing() {
        let report = inspect("010000 ff", &[FieldKind::Uint24], Endianness::Little).unwrap();
        assert_eq!(report.fields[0].value, FieldValue::Number(Number::Unsigned(1)));
        assert_eq!(report.trailing, 1);
    }

    #[test]
    fn inspect_short_read_names_field() {
        let err = inspect("0001", &[FieldKind::Int8, FieldKind::Int32], Endianness::Big)
            .unwrap_err();
        assert!(format!("{err:#}").contains("field 1"));
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
        assert_eq!(parse_hex(" 0X0a 0b ").unwrap(), [0x0a, 0x0b]);
    }

    #[test]
    fn config_file_applies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.toml");
        std::fs::write(&path, "long_width = \"bits32\"\n").unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.long_width, LongWidth::Bits32);

        let report = cmd_inspect(
            &InspectArgs {
                hex: "ffffffff".into(),
                fields: vec![FieldKind::Long],
                endian: Endianness::Big,
            },
            &config,
        )
        .unwrap();
        assert_eq!(report.fields[0].value, FieldValue::Number(Number::Signed(-1)));
        assert_eq!(report.trailing, 0);
    }

    #[test]
    fn missing_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("absent.toml").as_path())).is_err());
        assert_eq!(load_config(None).unwrap(), CodecConfig::default());
    }

    #[test]
    fn json_report_shape() {
        let report = Report::Id(cmd_id_to_tag(&IdToTagArgs { low: 6, high: 28 }).unwrap());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tag"], "#8GGL");
        assert_eq!(json["descriptor"], "(6, 28)");
    }
}
