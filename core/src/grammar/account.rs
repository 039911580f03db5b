//! Account transaction grammar

use num_enum::TryFromPrimitive;

use super::{push_address_screen, TransactionGrammar};
use crate::{
    address::SCRIPT_HASH_LEN,
    engine::{Driver, Error},
    helpers::{fmt_value_scaled, to_hex},
    reader::Reader,
    screen::{PageType, Screen, ScreenSet, TEXT_WIDTH},
};

/// Address version prefix, encodes to the `AP` address family
const ADDRESS_PREFIX: &[u8] = &[0x05, 0x48];

/// Version field length in bytes
const VERSION_LEN: usize = 4;

/// Nonce field length in bytes
const NONCE_LEN: usize = 8;

/// Fixed-point scale of the value field
const VALUE_SCALE: usize = 18;

/// Fixed-point scale of the fee field
const FEE_SCALE: usize = 15;

/// Show the version screen
const SHOW_VERSION: bool = false;

/// Show the sender address screen
const SHOW_FROM_ADDRESS: bool = false;

/// Account transaction types
#[derive(Copy, Clone, PartialEq, Eq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum AccountTxType {
    Miner = 0x00,
    Transfer = 0x01,
    Deploy = 0x02,
    Call = 0x03,
    Refund = 0x04,
    Schedule = 0x05,
}

impl AccountTxType {
    /// Display label for the type screen
    pub fn label(&self) -> &'static str {
        match self {
            AccountTxType::Miner => "Miner",
            AccountTxType::Transfer => "Transfer",
            AccountTxType::Deploy => "Deploy",
            AccountTxType::Call => "Call",
            AccountTxType::Refund => "Refund",
            AccountTxType::Schedule => "Schedule",
        }
    }
}

/// Account grammar
///
/// Field order: version, type, from hash, to hash, value, nonce, data,
/// fee. The type, recipient address, value and fee are displayed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct AccountGrammar;

impl AccountGrammar {
    fn push_value_screen(
        label: &str,
        value: &[u8],
        scale: usize,
        screens: &mut ScreenSet,
    ) -> Result<(), Error> {
        let mut screen = Screen::new(PageType::Single);
        screen.set_line(0, label);

        let mut buff = [0u8; TEXT_WIDTH * 2];
        let n = fmt_value_scaled(value, scale, &mut buff)?;
        screen.set_line_bytes(1, &buff[..n]);
        screens.push(screen);

        Ok(())
    }
}

impl TransactionGrammar for AccountGrammar {
    fn address_prefix(&self) -> &'static [u8] {
        ADDRESS_PREFIX
    }

    fn address_len(&self) -> usize {
        35
    }

    fn address_split(&self) -> [usize; 3] {
        [12, 11, 12]
    }

    fn decode<D: Driver>(
        &self,
        drv: &D,
        tx: &[u8],
        screens: &mut ScreenSet,
    ) -> Result<(), Error> {
        let mut r = Reader::new(tx);

        let version = r.read_bytes(VERSION_LEN)?;
        if SHOW_VERSION {
            let mut screen = Screen::new(PageType::Single);
            screen.set_line(0, "Version");
            let mut buff = [0u8; TEXT_WIDTH];
            let n = to_hex(version, &mut buff);
            screen.set_line_bytes(1, &buff[..n]);
            screens.push(screen);
        }

        let tx_type = AccountTxType::try_from_primitive(r.read_byte()?)
            .map_err(|_| Error::MalformedField)?;

        let mut screen = Screen::new(PageType::Single);
        screen.set_line(0, "Tx Type");
        screen.set_line(1, tx_type.label());
        screens.push(screen);

        let from_hash: &[u8; SCRIPT_HASH_LEN] = r
            .read_bytes(SCRIPT_HASH_LEN)?
            .try_into()
            .map_err(|_| Error::BufferExhausted)?;
        if SHOW_FROM_ADDRESS {
            push_address_screen(drv, self, from_hash, screens)?;
        }

        let to_hash: &[u8; SCRIPT_HASH_LEN] = r
            .read_bytes(SCRIPT_HASH_LEN)?
            .try_into()
            .map_err(|_| Error::BufferExhausted)?;
        push_address_screen(drv, self, to_hash, screens)?;

        let value_len = r.read_varbytes_len()?;
        let value = r.read_bytes(value_len)?;
        Self::push_value_screen("Value", value, VALUE_SCALE, screens)?;

        r.skip(NONCE_LEN)?;

        let data_len = r.read_varbytes_len()?;
        r.skip(data_len)?;

        let fee_len = r.read_varbytes_len()?;
        let fee = r.read_bytes(fee_len)?;
        Self::push_value_screen("Fee", fee, FEE_SCALE, screens)?;

        // remaining bytes are the appended derivation path, not part of
        // the transaction grammar
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::tests::TestDriver;
    use hex_literal::hex;

    // transfer of 1 token with a 0.003 fee
    const TRANSFER_TX: &[u8] = &hex!(
        "00000001"
        "01"
        "f753e908bde2dea0dc378cb39995f058d17682ce"
        "8dc34d5f4a634db23def2e6ba35df5537a9a304f"
        "080de0b6b3a7640000"
        "0000000000000000"
        "0100"
        "0602ba7def3000"
    );

    fn decode(tx: &[u8]) -> Result<ScreenSet, Error> {
        let mut screens = ScreenSet::new();
        AccountGrammar.decode(&TestDriver::new(), tx, &mut screens)?;
        Ok(screens)
    }

    #[test]
    fn transfer_tx_screens() {
        let screens = decode(TRANSFER_TX).unwrap();
        assert_eq!(screens.len(), 4);

        let s = screens.get(0).unwrap();
        assert_eq!(s.lines[0].as_str(), "Tx Type");
        assert_eq!(s.lines[1].as_str(), "Transfer");

        let s = screens.get(1).unwrap();
        assert_eq!(s.lines[0].as_str(), "APEt5ThLdoXi");
        assert_eq!(s.lines[1].as_str(), "MGQkDmGnfY2");
        assert_eq!(s.lines[2].as_str(), "71vJrii5LxxM");
        assert_eq!(s.page, PageType::Two);

        let s = screens.get(2).unwrap();
        assert_eq!(s.lines[0].as_str(), "Value");
        assert_eq!(s.lines[1].as_str(), "1");

        let s = screens.get(3).unwrap();
        assert_eq!(s.lines[0].as_str(), "Fee");
        assert_eq!(s.lines[1].as_str(), "0.003");
    }

    #[test]
    fn fractional_value_and_fee() {
        // value 2500000000000000000 -> 2.5, fee 100000000000 -> 0.0001
        let mut tx = vec![0, 0, 0, 0, 0x01];
        tx.extend_from_slice(&[0x22; SCRIPT_HASH_LEN]);
        tx.extend_from_slice(&[0x33; SCRIPT_HASH_LEN]);
        tx.push(0x08);
        tx.extend_from_slice(&2_500_000_000_000_000_000u64.to_be_bytes());
        tx.extend_from_slice(&[0u8; NONCE_LEN]);
        tx.push(0x00);
        tx.push(0x06);
        tx.extend_from_slice(&100_000_000_000u64.to_be_bytes()[2..]);

        let screens = decode(&tx).unwrap();
        assert_eq!(screens.get(2).unwrap().lines[1].as_str(), "2.5");
        assert_eq!(screens.get(3).unwrap().lines[1].as_str(), "0.0001");
    }

    #[test]
    fn trailing_path_bytes_ignored() {
        let mut tx = TRANSFER_TX.to_vec();
        tx.extend_from_slice(&[0u8; 20]);
        assert_eq!(decode(&tx).unwrap().len(), 4);
    }

    #[test]
    fn unknown_type_faults() {
        let mut tx = TRANSFER_TX.to_vec();
        tx[4] = 0x77;
        assert_eq!(decode(&tx), Err(Error::MalformedField));
    }

    #[test]
    fn reserved_value_length_faults() {
        let mut tx = TRANSFER_TX[..45].to_vec();
        tx.push(0xFD);
        assert_eq!(decode(&tx), Err(Error::UnsupportedLengthEncoding));
    }

    #[test]
    fn truncated_fee_faults() {
        let truncated = &TRANSFER_TX[..TRANSFER_TX.len() - 3];
        assert_eq!(decode(truncated), Err(Error::BufferExhausted));
    }
}
