//! hash64 编码
//!
//! crypt 系列哈希使用的类 base64 编码。与标准 base64 的区别：
//!
//! - 字母表为 `./0-9A-Za-z`
//! - 每 3 个字节按小端序组成 24 位整数，再从低位开始每 6 位输出一个字符
//! - 没有填充字符
//!
//! ## 示例
//!
//! ```rust
//! use passctx::crypto::h64;
//!
//! assert_eq!(h64::encode_bytes(&[0, 0, 0]), "....");
//! assert_eq!(h64::encode_bytes(&[0xff, 0xff, 0xff]), "zzzz");
//! ```

/// hash64 字母表，下标即编码值
pub const HASH64_CHARS: &str = "./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const ALPHABET: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// 编码值 (0..64) 对应的字符
#[inline]
pub fn encode_value(value: u8) -> char {
    ALPHABET[(value & 0x3f) as usize] as char
}

/// 字符对应的编码值，不在字母表中返回 `None`
pub fn decode_char(c: char) -> Option<u8> {
    match c {
        '.' => Some(0),
        '/' => Some(1),
        '0'..='9' => Some(c as u8 - b'0' + 2),
        'A'..='Z' => Some(c as u8 - b'A' + 12),
        'a'..='z' => Some(c as u8 - b'a' + 38),
        _ => None,
    }
}

/// 字符串是否完全由 hash64 字符组成
pub fn is_hash64(s: &str) -> bool {
    s.chars().all(|c| decode_char(c).is_some())
}

/// 以小端序 hash64 编码字节序列
///
/// 每 3 字节输出 4 个字符；末尾剩 1 字节输出 2 个字符，剩 2 字节输出 3 个字符。
pub fn encode_bytes(source: &[u8]) -> String {
    let mut out = String::with_capacity(source.len().div_ceil(3) * 4);

    for chunk in source.chunks(3) {
        let mut value = 0u32;
        for (i, b) in chunk.iter().enumerate() {
            value |= (*b as u32) << (8 * i);
        }
        let chars = match chunk.len() {
            3 => 4,
            2 => 3,
            _ => 2,
        };
        for k in 0..chars {
            out.push(encode_value((value >> (6 * k)) as u8));
        }
    }

    out
}

/// 先按偏移表重排字节，再进行 hash64 编码
///
/// 输出的第 `k` 个字节为 `source[offsets[k]]`。偏移表允许重复下标。
///
/// # Panics
///
/// 偏移表中的下标超出 `source` 长度时 panic。
pub fn encode_transposed_bytes(source: &[u8], offsets: &[usize]) -> String {
    let transposed: Vec<u8> = offsets.iter().map(|&i| source[i]).collect();
    encode_bytes(&transposed)
}
