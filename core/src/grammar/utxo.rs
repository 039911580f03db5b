//! Legacy UTXO transaction grammar

use byteorder::{ByteOrder, LittleEndian};
use const_decoder::Decoder;
use num_enum::TryFromPrimitive;

use super::{push_address_screen, TransactionGrammar};
use crate::{
    address::SCRIPT_HASH_LEN,
    engine::{Driver, Error},
    helpers::fmt_value_scaled,
    reader::Reader,
    screen::{PageType, Screen, ScreenSet, TEXT_WIDTH},
};

/// Address version prefix
const ADDRESS_PREFIX: &[u8] = &[0x17];

/// Coin reference length, a 32-byte previous hash and 2-byte index
const COIN_REFERENCE_LEN: usize = 34;

/// Asset id length in bytes
const ASSET_ID_LEN: usize = 32;

/// Output value length, little-endian fixed-point
const VALUE_LEN: usize = 8;

/// Fixed-point scale of output values
const VALUE_SCALE: usize = 8;

/// NEO asset id, display (big-endian) order
const NEO_ASSET_ID: [u8; ASSET_ID_LEN] =
    Decoder::Hex.decode(b"c56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b");

/// GAS asset id, display (big-endian) order
const GAS_ASSET_ID: [u8; ASSET_ID_LEN] =
    Decoder::Hex.decode(b"602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7");

/// Legacy transaction types
#[derive(Copy, Clone, PartialEq, Eq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum UtxoTxType {
    Miner = 0x00,
    Issue = 0x01,
    Claim = 0x02,
    Enroll = 0x20,
    Register = 0x40,
    Contract = 0x80,
    Publish = 0xD0,
    Invoke = 0xD1,
}

impl UtxoTxType {
    /// Display label for the type screen
    pub fn label(&self) -> &'static str {
        match self {
            UtxoTxType::Miner => "Miner Tx",
            UtxoTxType::Issue => "Issue Tx",
            UtxoTxType::Claim => "Claim Tx",
            UtxoTxType::Enroll => "Enroll Tx",
            UtxoTxType::Register => "Register Tx",
            UtxoTxType::Contract => "Contract Tx",
            UtxoTxType::Publish => "Publish Tx",
            UtxoTxType::Invoke => "Invoke Tx",
        }
    }
}

/// Display label for an asset id in wire (little-endian) order
fn asset_label(asset_id: &[u8]) -> &'static str {
    if asset_id.iter().rev().eq(NEO_ASSET_ID.iter()) {
        "NEO"
    } else if asset_id.iter().rev().eq(GAS_ASSET_ID.iter()) {
        "GAS"
    } else {
        "UNKNOWN"
    }
}

/// Legacy UTXO grammar
///
/// Field order: type, version, type-exclusive data, attribute list,
/// coin reference list, output list. Only outputs are displayed, each
/// as an asset/value screen followed by an address screen.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct UtxoGrammar;

impl TransactionGrammar for UtxoGrammar {
    fn address_prefix(&self) -> &'static [u8] {
        ADDRESS_PREFIX
    }

    fn address_len(&self) -> usize {
        34
    }

    fn address_split(&self) -> [usize; 3] {
        [11, 11, 12]
    }

    fn decode<D: Driver>(
        &self,
        drv: &D,
        tx: &[u8],
        screens: &mut ScreenSet,
    ) -> Result<(), Error> {
        let mut r = Reader::new(tx);

        let tx_type = UtxoTxType::try_from_primitive(r.read_byte()?)
            .map_err(|_| Error::MalformedField)?;

        let mut screen = Screen::new(PageType::Single);
        screen.set_line(1, tx_type.label());
        screens.push(screen);

        let version = r.read_byte()?;

        // type-exclusive data
        match tx_type {
            UtxoTxType::Claim => {
                let num_claims = r.read_varbytes_len()?;
                r.skip(num_claims * COIN_REFERENCE_LEN)?;
            }
            UtxoTxType::Invoke => {
                let script_len = r.read_varbytes_len()?;
                r.skip(script_len)?;
                if version >= 1 {
                    r.skip(8)?;
                }
            }
            _ => (),
        }

        let num_attr = r.read_varbytes_len()?;
        for _ in 0..num_attr {
            let usage = r.read_byte()?;
            match usage {
                // contract hash, vote, extra hashes, ECDH keys
                0x00 | 0x30 | 0xa1..=0xaf | 0x02 | 0x03 => r.skip(32)?,
                // script
                0x20 => r.skip(SCRIPT_HASH_LEN)?,
                // description url, plain byte length
                0x81 => {
                    let len = r.read_byte()?;
                    r.skip(len as usize)?;
                }
                // description, remark
                0x90 | 0xf0 => {
                    let len = r.read_varbytes_len()?;
                    r.skip(len)?;
                }
                _ => return Err(Error::MalformedField),
            }
        }

        let num_inputs = r.read_varbytes_len()?;
        r.skip(num_inputs * COIN_REFERENCE_LEN)?;

        let num_outputs = r.read_varbytes_len()?;
        for _ in 0..num_outputs {
            let asset_id = r.read_bytes(ASSET_ID_LEN)?;
            let value = r.read_bytes(VALUE_LEN)?;
            let script_hash: &[u8; SCRIPT_HASH_LEN] = r
                .read_bytes(SCRIPT_HASH_LEN)?
                .try_into()
                .map_err(|_| Error::BufferExhausted)?;

            let mut screen = Screen::new(PageType::Single);
            screen.set_line(0, asset_label(asset_id));

            let amount = LittleEndian::read_u64(value);
            let mut buff = [0u8; TEXT_WIDTH * 2];
            let n = fmt_value_scaled(&amount.to_be_bytes(), VALUE_SCALE, &mut buff)?;
            screen.set_line_bytes(1, &buff[..n]);
            screens.push(screen);

            push_address_screen(drv, self, script_hash, screens)?;
        }

        // remaining bytes are the appended derivation path, not part of
        // the transaction grammar
        Ok(())
    }
}
