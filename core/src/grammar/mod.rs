//! Transaction grammars
//!
//! Two wire formats share the decoding primitives: the legacy UTXO
//! format and the account format. A grammar walks the finalized buffer
//! strictly in protocol order and emits review screens, trailing bytes
//! past the grammar (the appended BIP-44 path) are ignored.

use crate::{
    address::{derive_address, MAX_ADDRESS_LEN, SCRIPT_HASH_LEN},
    engine::{Driver, Error},
    screen::{PageType, Screen, ScreenSet},
};

mod account;
mod utxo;

pub use account::AccountGrammar;
pub use utxo::UtxoGrammar;

/// Decoding behavior shared by both wire formats
pub trait TransactionGrammar {
    /// Version prefix prepended to script hashes for address display
    fn address_prefix(&self) -> &'static [u8];

    /// Encoded address length in characters
    fn address_len(&self) -> usize;

    /// Line widths for splitting an address across a screen
    fn address_split(&self) -> [usize; 3];

    /// Decode a finalized transaction into review screens
    ///
    /// On fault the screen set may hold a partial decode, the caller
    /// must discard it and treat the session as tainted.
    fn decode<D: Driver>(
        &self,
        drv: &D,
        tx: &[u8],
        screens: &mut ScreenSet,
    ) -> Result<(), Error>;
}

/// Runtime grammar selection
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, strum::Display)]
pub enum Grammar {
    /// Legacy UTXO transaction format
    #[default]
    Utxo,
    /// Account transaction format
    Account,
}

impl Grammar {
    /// Address version prefix for the selected grammar
    pub fn address_prefix(&self) -> &'static [u8] {
        match self {
            Grammar::Utxo => UtxoGrammar.address_prefix(),
            Grammar::Account => AccountGrammar.address_prefix(),
        }
    }

    /// Decode a finalized transaction into review screens
    pub fn decode<D: Driver>(
        &self,
        drv: &D,
        tx: &[u8],
        screens: &mut ScreenSet,
    ) -> Result<(), Error> {
        match self {
            Grammar::Utxo => UtxoGrammar.decode(drv, tx, screens),
            Grammar::Account => AccountGrammar.decode(drv, tx, screens),
        }
    }
}

/// Derive and push a two-page address screen for a script hash
fn push_address_screen<D: Driver, G: TransactionGrammar>(
    drv: &D,
    grammar: &G,
    script_hash: &[u8; SCRIPT_HASH_LEN],
    screens: &mut ScreenSet,
) -> Result<(), Error> {
    let mut buff = [0u8; MAX_ADDRESS_LEN];
    let n = derive_address(drv, grammar.address_prefix(), script_hash, &mut buff)?;
    if n != grammar.address_len() {
        return Err(Error::EncodingOverflow);
    }

    let mut screen = Screen::new(PageType::Two);
    let mut ix = 0;
    for (line, width) in grammar.address_split().iter().enumerate() {
        screen.set_line_bytes(line, &buff[ix..ix + width]);
        ix += width;
    }
    screens.push(screen);

    Ok(())
}
