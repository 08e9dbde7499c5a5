// AES-128-CBC file encryption/decryption, whole-buffer with PKCS#7 padding.
//
// Equivalent command:
//   openssl aes-128-cbc -K <hex key> -iv <hex iv> -d -in segment.ts -out out.ts

use std::path::Path;

use aes::Aes128;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};

use crate::error::MirrorError;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

const BLOCK_SIZE: usize = 16;

/// Encrypt `input` into `output` with AES-128-CBC.
///
/// `iv` and `key` are hex strings (an optional `0x` prefix is stripped) and
/// must decode to 16 bytes each. The output file is written read-only.
pub fn encrypt_file(iv: &str, key: &str, input: &Path, output: &Path) -> Result<(), MirrorError> {
    let iv = decode_hex_block("IV", iv)?;
    let key = decode_hex_block("key", key)?;

    let plaintext = std::fs::read(input)?;
    let cipher = Aes128CbcEnc::new_from_slices(&key, &iv)
        .map_err(|e| MirrorError::cipher(format!("failed to initialize AES encryptor: {e}")))?;

    let message_len = plaintext.len();
    let mut buffer = vec![0u8; (message_len / BLOCK_SIZE + 1) * BLOCK_SIZE];
    buffer[..message_len].copy_from_slice(&plaintext);
    let ciphertext = cipher
        .encrypt_padded_mut::<Pkcs7>(&mut buffer, message_len)
        .map_err(|e| MirrorError::cipher(format!("encryption failed: {e}")))?;

    write_read_only(output, ciphertext)
}

/// Decrypt `input` into `output` with AES-128-CBC.
///
/// Accepts the same hex `iv`/`key` arguments as [`encrypt_file`]; the output
/// file is written read-only.
pub fn decrypt_file(iv: &str, key: &str, input: &Path, output: &Path) -> Result<(), MirrorError> {
    let iv = decode_hex_block("IV", iv)?;
    let key = decode_hex_block("key", key)?;

    let mut buffer = std::fs::read(input)?;
    let cipher = Aes128CbcDec::new_from_slices(&key, &iv)
        .map_err(|e| MirrorError::cipher(format!("failed to initialize AES decryptor: {e}")))?;

    let plaintext = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut buffer)
        .map_err(|e| MirrorError::cipher(format!("decryption failed: {e}")))?;

    write_read_only(output, plaintext)
}

fn decode_hex_block(label: &str, hex_str: &str) -> Result<[u8; BLOCK_SIZE], MirrorError> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let mut bytes = [0u8; BLOCK_SIZE];
    hex::decode_to_slice(stripped, &mut bytes)
        .map_err(|e| MirrorError::cipher(format!("invalid {label} `{hex_str}`: {e}")))?;
    Ok(bytes)
}

fn write_read_only(path: &Path, data: &[u8]) -> Result<(), MirrorError> {
    std::fs::write(path, data)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o444))?;
    }
    Ok(())
}
