use bytestream_types::{BridgeError, LogicLong, TagBridge};
use tracing::trace;

/// Symbols of the tag alphabet, in digit order.
pub const TAG_ALPHABET: &[u8; 14] = b"0289PYLQGRJCUV";

const BASE: u64 = TAG_ALPHABET.len() as u64;

/// The low word holds the bottom 8 bits of the tag number.
const LOW_BITS: u32 = 8;
const LOW_MASK: u64 = (1 << LOW_BITS) - 1;

/// Tag bridge backed by the hashtag alphabet.
///
/// A tag is a base-14 number `T` over [`TAG_ALPHABET`], optionally prefixed
/// with `#`. The identifier is `low = T & 0xFF`, `high = T >> 8`, so only
/// identifiers with `low < 256` have a tag.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashtagBridge;

impl HashtagBridge {
    pub fn new() -> Self {
        Self
    }

    /// Base-14 value of a tag body.
    fn tag_number(tag: &str) -> Result<u64, BridgeError> {
        let body = tag.trim();
        let body = body.strip_prefix('#').unwrap_or(body);
        if body.is_empty() {
            return Err(BridgeError::EmptyTag);
        }

        let mut total: u64 = 0;
        for (position, ch) in body.chars().enumerate() {
            let digit = symbol_value(ch).ok_or(BridgeError::InvalidCharacter { ch, position })?;
            total = total
                .checked_mul(BASE)
                .and_then(|t| t.checked_add(digit))
                .ok_or_else(|| BridgeError::TagOutOfRange(tag.to_string()))?;
        }
        Ok(total)
    }
}

/// Digit value of a tag symbol; `O` is read as `0`, lowercase is accepted.
fn symbol_value(ch: char) -> Option<u64> {
    let ch = match ch.to_ascii_uppercase() {
        'O' => '0',
        c => c,
    };
    if !ch.is_ascii() {
        return None;
    }
    TAG_ALPHABET
        .iter()
        .position(|&s| s == ch as u8)
        .map(|p| p as u64)
}

impl TagBridge for HashtagBridge {
    fn tag_to_id(&self, tag: &str) -> Result<LogicLong, BridgeError> {
        let total = Self::tag_number(tag)?;
        let high = u32::try_from(total >> LOW_BITS)
            .map_err(|_| BridgeError::TagOutOfRange(tag.to_string()))?;
        let id = LogicLong::new((total & LOW_MASK) as u32, high);
        trace!(tag, %id, "tag resolved");
        Ok(id)
    }

    fn id_to_tag(&self, id: LogicLong) -> Result<String, BridgeError> {
        if u64::from(id.low) > LOW_MASK {
            return Err(BridgeError::UnmappedId {
                low: id.low,
                high: id.high,
            });
        }

        let mut total = (u64::from(id.high) << LOW_BITS) | u64::from(id.low);
        let mut symbols = Vec::new();
        loop {
            symbols.push(TAG_ALPHABET[(total % BASE) as usize]);
            total /= BASE;
            if total == 0 {
                break;
            }
        }
        symbols.push(b'#');
        symbols.reverse();
        // every pushed byte comes from the ASCII alphabet
        Ok(symbols.into_iter().map(char::from).collect())
    }
}
