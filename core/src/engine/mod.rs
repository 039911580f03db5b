//! The [Engine] provides the transaction review pipeline for hardware
//! wallets.
//!
//! This handles [Event] inputs and returns [Output] responses to the
//! caller, see [apdu][crate::apdu] for APDU protocol / encoding
//! specifications. Platform crypto is provided via the [Driver] trait.

use heapless::Vec;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use ledger_neo_apdu::{parse_bip44, Bip44Path, BIP44_BYTE_LEN};

use crate::{
    address::{derive_address, public_key_script_hash, MAX_ADDRESS_LEN, SCRIPT_HASH_LEN},
    grammar::Grammar,
    screen::{Screen, ScreenSet},
    MAX_RAW_LENGTH,
};

mod event;
pub use event::Event;

mod output;
pub use output::Output;

mod error;
pub use error::Error;

mod nav;
pub use nav::NavState;

/// Maximum DER-encoded ECDSA signature length
pub const MAX_SIGNATURE_LEN: usize = 72;

/// DER-encoded ECDSA signature
pub type Signature = Vec<u8, MAX_SIGNATURE_LEN>;

/// Engine session state enumeration
#[derive(Copy, Clone, PartialEq, Debug, Default, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// Idle, no transaction in flight
    #[default]
    Idle,
    /// Accumulating transaction chunks
    Receiving,
    /// Decoded transaction awaiting user review
    Pending,
}

/// [`Driver`] trait provides platform crypto for [`Engine`] instances
pub trait Driver {
    /// SHA-256 digest
    fn sha256(&self, data: &[u8]) -> [u8; 32];

    /// RIPEMD-160 digest
    fn ripemd160(&self, data: &[u8]) -> [u8; SCRIPT_HASH_LEN];

    /// Uncompressed SECP256R1 public key for a BIP-44 path
    fn public_key(&self, path: &Bip44Path) -> Result<[u8; 65], Error>;

    /// Deterministic ECDSA signature over a digest, DER encoded
    fn ecdsa_sign(&self, path: &Bip44Path, digest: &[u8; 32]) -> Result<Signature, Error>;
}

impl<T: Driver> Driver for &mut T {
    fn sha256(&self, data: &[u8]) -> [u8; 32] {
        T::sha256(self, data)
    }

    fn ripemd160(&self, data: &[u8]) -> [u8; SCRIPT_HASH_LEN] {
        T::ripemd160(self, data)
    }

    fn public_key(&self, path: &Bip44Path) -> Result<[u8; 65], Error> {
        T::public_key(self, path)
    }

    fn ecdsa_sign(&self, path: &Bip44Path, digest: &[u8; 32]) -> Result<Signature, Error> {
        T::ecdsa_sign(self, path, digest)
    }
}

/// [Engine] provides hardware-independent transaction review and signing
///
/// One instance owns the accumulation buffer, the decoded screen set and
/// both session state machines.
pub struct Engine<DRV: Driver> {
    state: State,
    tainted: bool,

    grammar: Grammar,

    buffer: Vec<u8, MAX_RAW_LENGTH>,
    screens: ScreenSet,
    nav: NavState,

    drv: DRV,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver and grammar
    pub fn new(drv: DRV, grammar: Grammar) -> Self {
        Self {
            state: State::Idle,
            // force a fresh accumulation on the first chunk
            tainted: true,
            grammar,
            buffer: Vec::new(),
            screens: ScreenSet::new(),
            nav: NavState::TopSign,
            drv,
        }
    }

    /// Current session state
    pub fn state(&self) -> State {
        self.state
    }

    /// Current navigation position
    pub fn nav_state(&self) -> NavState {
        self.nav
    }

    /// Decoded review screens
    pub fn screens(&self) -> &ScreenSet {
        &self.screens
    }

    /// Screen under the navigation cursor, when paging transaction text
    pub fn current_screen(&self) -> Option<&Screen> {
        match self.nav {
            NavState::TxDesc(i) => self.screens.get(i),
            _ => None,
        }
    }

    /// Accumulated transaction bytes
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Selected transaction grammar
    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Reset the session, discarding any accumulated state
    ///
    /// The taint flag stays set so the next chunk starts a fresh
    /// accumulation regardless of its marker.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.tainted = true;
        self.buffer.clear();
        self.screens.clear();
        self.nav = NavState::TopSign;
    }

    /// Handle an incoming event
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:02x?}", evt);

        let r = self.handle(evt);

        #[cfg(feature = "log")]
        if let Err(e) = &r {
            log::warn!("fault: {:?}", e);
        }

        // chunk faults discard the partial transaction, gesture misuse
        // leaves the session untouched
        if r.is_err() && matches!(evt, Event::TxChunk { .. }) {
            self.reset();
        }

        r
    }

    fn handle(&mut self, evt: &Event) -> Result<Output, Error> {
        match (self.state, evt) {
            (_, Event::None) => Ok(Output::None),

            // public key requests are independent of reception state and
            // never touch the accumulation buffer
            (_, Event::GetPublicKey { path }) => self.get_public_key(path),

            (_, Event::TxChunk { last, data }) => self.rx_chunk(*last, data),

            (State::Pending, Event::NavUp) => {
                self.nav = self.nav.up(self.screens.len());
                Ok(Output::None)
            }
            (State::Pending, Event::NavDown) => {
                self.nav = self.nav.down(self.screens.len());
                Ok(Output::None)
            }

            (State::Pending, Event::Approve) if self.nav.can_approve() => self.approve(),
            (State::Pending, Event::Deny) if self.nav.can_deny() => {
                self.reset();
                Ok(Output::Denied)
            }

            (_, Event::NavUp | Event::NavDown | Event::Approve | Event::Deny) => {
                Err(Error::NavigationMisuse)
            }
        }
    }

    fn rx_chunk(&mut self, last: bool, data: &[u8]) -> Result<Output, Error> {
        // a tainted or completed session restarts accumulation, whatever
        // the chunk marker says
        if self.tainted || self.state != State::Receiving {
            self.buffer.clear();
            self.screens.clear();
            self.nav = NavState::TopSign;
            self.tainted = false;
            self.state = State::Receiving;
        }

        self.buffer
            .extend_from_slice(data)
            .map_err(|_| Error::BufferOverflow)?;

        if !last {
            return Ok(Output::None);
        }

        // final chunk carries the derivation path after the transaction
        if self.buffer.len() < BIP44_BYTE_LEN {
            return Err(Error::InvalidLength);
        }

        self.grammar
            .decode(&self.drv, &self.buffer, &mut self.screens)?;

        #[cfg(feature = "log")]
        log::debug!("decoded {} screens", self.screens.len());

        self.state = State::Pending;
        self.nav = NavState::TopSign;

        Ok(Output::None)
    }

    fn approve(&mut self) -> Result<Output, Error> {
        let tx_len = self.buffer.len() - BIP44_BYTE_LEN;

        let digest = self.drv.sha256(&self.buffer[..tx_len]);
        let path = match parse_bip44(&self.buffer[tx_len..]) {
            Ok(v) => v,
            Err(_) => {
                self.reset();
                return Err(Error::InvalidLength);
            }
        };

        let signature = match self.drv.ecdsa_sign(&path, &digest) {
            Ok(v) => v,
            Err(e) => {
                self.reset();
                return Err(e);
            }
        };

        self.reset();

        Ok(Output::Signature { signature, digest })
    }

    fn get_public_key(&self, path: &Bip44Path) -> Result<Output, Error> {
        let public_key = self.drv.public_key(path)?;
        let script_hash = public_key_script_hash(&self.drv, &public_key);

        let mut buff = [0u8; MAX_ADDRESS_LEN];
        let n = derive_address(
            &self.drv,
            self.grammar.address_prefix(),
            &script_hash,
            &mut buff,
        )?;

        let text = core::str::from_utf8(&buff[..n]).map_err(|_| Error::EncodingOverflow)?;
        let mut address = heapless::String::new();
        address
            .push_str(text)
            .map_err(|_| Error::EncodingOverflow)?;

        Ok(Output::PublicKey {
            public_key,
            address,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use ledger_neo_apdu::encode_bip44;
    use ripemd::Ripemd160;
    use sha2::{Digest as _, Sha256};

    /// Host-side driver backed by software hashes and a deterministic
    /// stand-in signer
    pub struct TestDriver;

    impl TestDriver {
        pub fn new() -> Self {
            TestDriver
        }
    }

    impl Driver for TestDriver {
        fn sha256(&self, data: &[u8]) -> [u8; 32] {
            Sha256::digest(data).into()
        }

        fn ripemd160(&self, data: &[u8]) -> [u8; SCRIPT_HASH_LEN] {
            Ripemd160::digest(data).into()
        }

        fn public_key(&self, path: &Bip44Path) -> Result<[u8; 65], Error> {
            let mut encoded = [0u8; BIP44_BYTE_LEN];
            encode_bip44(path, &mut encoded).map_err(|_| Error::InvalidLength)?;

            let x = self.sha256(&encoded);
            let y = self.sha256(&x);

            let mut key = [0u8; 65];
            key[0] = 0x04;
            key[1..33].copy_from_slice(&x);
            key[33..].copy_from_slice(&y);
            Ok(key)
        }

        fn ecdsa_sign(&self, path: &Bip44Path, digest: &[u8; 32]) -> Result<Signature, Error> {
            let mut encoded = [0u8; BIP44_BYTE_LEN];
            encode_bip44(path, &mut encoded).map_err(|_| Error::InvalidLength)?;
            let s: [u8; 32] = {
                let mut h = Sha256::new();
                h.update(encoded);
                h.update(digest);
                h.finalize().into()
            };

            let mut sig = Signature::new();
            sig.extend_from_slice(&[0x30, 0x44, 0x02, 0x20])
                .map_err(|_| Error::SignError)?;
            sig.extend_from_slice(digest).map_err(|_| Error::SignError)?;
            sig.extend_from_slice(&[0x02, 0x20]).map_err(|_| Error::SignError)?;
            sig.extend_from_slice(&s).map_err(|_| Error::SignError)?;

            Ok(sig)
        }
    }

    const TEST_PATH: Bip44Path = [0x8000002C, 0x80000378, 0x80000000, 0, 0];

    fn path_bytes() -> [u8; BIP44_BYTE_LEN] {
        let mut buff = [0u8; BIP44_BYTE_LEN];
        encode_bip44(&TEST_PATH, &mut buff).unwrap();
        buff
    }

    // minimal account transfer, value 2.5 and fee 0.0001
    fn account_tx() -> std::vec::Vec<u8> {
        let mut tx = vec![0, 0, 0, 0, 0x01];
        tx.extend_from_slice(&[0x22; SCRIPT_HASH_LEN]);
        tx.extend_from_slice(&[0x33; SCRIPT_HASH_LEN]);
        tx.push(0x08);
        tx.extend_from_slice(&2_500_000_000_000_000_000u64.to_be_bytes());
        tx.extend_from_slice(&[0u8; 8]);
        tx.push(0x00);
        tx.push(0x06);
        tx.extend_from_slice(&100_000_000_000u64.to_be_bytes()[2..]);
        tx
    }

    fn engine(grammar: Grammar) -> Engine<TestDriver> {
        let _ = simplelog::SimpleLogger::init(
            simplelog::LevelFilter::Debug,
            simplelog::Config::default(),
        );
        Engine::new(TestDriver::new(), grammar)
    }

    #[test]
    fn account_review_and_sign() {
        let mut e = engine(Grammar::Account);
        let tx = account_tx();

        // stream in two chunks with the path appended to the last
        let (a, b) = tx.split_at(10);
        let mut final_chunk = b.to_vec();
        final_chunk.extend_from_slice(&path_bytes());

        assert_eq!(
            e.update(&Event::TxChunk {
                last: false,
                data: a
            }),
            Ok(Output::None)
        );
        assert_eq!(e.state(), State::Receiving);

        e.update(&Event::TxChunk {
            last: true,
            data: &final_chunk,
        })
        .unwrap();

        assert_eq!(e.state(), State::Pending);
        assert_eq!(e.nav_state(), NavState::TopSign);
        assert_eq!(e.screens().len(), 4);

        // page through every screen to the sign position
        for i in 0..4 {
            e.update(&Event::NavDown).unwrap();
            assert_eq!(e.nav_state(), NavState::TxDesc(i));
            assert!(e.current_screen().is_some());
        }
        e.update(&Event::NavDown).unwrap();
        assert_eq!(e.nav_state(), NavState::Sign);

        let out = e.update(&Event::Approve).unwrap();
        let expected_digest: [u8; 32] = Sha256::digest(&tx).into();
        let expected_sig = TestDriver::new()
            .ecdsa_sign(&TEST_PATH, &expected_digest)
            .unwrap();

        assert_eq!(
            out,
            Output::Signature {
                signature: expected_sig,
                digest: expected_digest
            }
        );

        assert_eq!(e.state(), State::Idle);
        assert_eq!(e.buffered().len(), 0);
    }

    #[test]
    fn legacy_review_and_sign() {
        let mut e = engine(Grammar::Utxo);

        // miner tx with no attributes, inputs or outputs
        let mut msg = vec![0x00, 0x00, 0x00, 0x00, 0x00];
        let tx = msg.clone();
        msg.extend_from_slice(&path_bytes());

        e.update(&Event::TxChunk {
            last: true,
            data: &msg,
        })
        .unwrap();
        assert_eq!(e.state(), State::Pending);
        assert_eq!(
            e.screens().get(0).unwrap().lines[1].as_str(),
            "Miner Tx"
        );

        let out = e.update(&Event::Approve).unwrap();
        let digest: [u8; 32] = Sha256::digest(&tx).into();
        match out {
            Output::Signature { digest: d, .. } => assert_eq!(d, digest),
            _ => panic!("expected signature"),
        }
    }

    #[test]
    fn deny_resets_session() {
        let mut e = engine(Grammar::Account);

        let mut msg = account_tx();
        msg.extend_from_slice(&path_bytes());
        e.update(&Event::TxChunk {
            last: true,
            data: &msg,
        })
        .unwrap();

        // deny is only accepted from the deny position
        assert_eq!(e.update(&Event::Deny), Err(Error::NavigationMisuse));
        assert_eq!(e.state(), State::Pending);

        e.update(&Event::NavUp).unwrap();
        assert_eq!(e.nav_state(), NavState::Deny);

        let out = e.update(&Event::Deny).unwrap();
        assert_eq!(out, Output::Denied);
        assert_eq!(out.status(), 0x6985);
        assert_eq!(e.state(), State::Idle);
    }

    #[test]
    fn decode_fault_taints_session() {
        let mut e = engine(Grammar::Account);

        let mut msg = account_tx();
        msg[4] = 0x99; // unknown type
        msg.extend_from_slice(&path_bytes());

        assert_eq!(
            e.update(&Event::TxChunk {
                last: true,
                data: &msg
            }),
            Err(Error::MalformedField)
        );
        assert_eq!(e.state(), State::Idle);
        assert_eq!(e.buffered().len(), 0);

        // next chunk starts fresh, not appended to stale data
        e.update(&Event::TxChunk {
            last: false,
            data: &[1, 2, 3],
        })
        .unwrap();
        assert_eq!(e.buffered(), &[1, 2, 3]);
    }

    #[test]
    fn oversized_transaction_faults() {
        let mut e = engine(Grammar::Account);

        let chunk = [0u8; 200];
        for _ in 0..5 {
            e.update(&Event::TxChunk {
                last: false,
                data: &chunk,
            })
            .unwrap();
        }
        assert_eq!(e.buffered().len(), 1000);

        assert_eq!(
            e.update(&Event::TxChunk {
                last: false,
                data: &[0u8; 100]
            }),
            Err(Error::BufferOverflow)
        );
        assert_eq!(e.state(), State::Idle);
        assert_eq!(e.buffered().len(), 0);
    }

    #[test]
    fn public_key_mid_reception() {
        let mut e = engine(Grammar::Account);

        e.update(&Event::TxChunk {
            last: false,
            data: &[9, 9, 9],
        })
        .unwrap();

        let out = e.update(&Event::GetPublicKey { path: TEST_PATH }).unwrap();
        match &out {
            Output::PublicKey {
                public_key,
                address,
            } => {
                assert_eq!(public_key[0], 0x04);
                assert_eq!(address.len(), 35);
                assert!(address.starts_with("AP"));
            }
            _ => panic!("expected public key"),
        }

        // reception is undisturbed
        assert_eq!(e.state(), State::Receiving);
        assert_eq!(e.buffered(), &[9, 9, 9]);
    }

    #[test]
    fn chunk_while_pending_restarts() {
        let mut e = engine(Grammar::Account);

        let mut msg = account_tx();
        msg.extend_from_slice(&path_bytes());
        e.update(&Event::TxChunk {
            last: true,
            data: &msg,
        })
        .unwrap();
        assert_eq!(e.state(), State::Pending);

        e.update(&Event::TxChunk {
            last: false,
            data: &[7, 7],
        })
        .unwrap();
        assert_eq!(e.state(), State::Receiving);
        assert_eq!(e.buffered(), &[7, 7]);
    }

    #[test]
    fn gestures_outside_review() {
        let mut e = engine(Grammar::Utxo);

        assert_eq!(e.update(&Event::NavDown), Err(Error::NavigationMisuse));
        assert_eq!(e.update(&Event::Approve), Err(Error::NavigationMisuse));
        assert_eq!(e.state(), State::Idle);
    }

    #[test]
    fn short_final_chunk_faults() {
        let mut e = engine(Grammar::Account);

        assert_eq!(
            e.update(&Event::TxChunk {
                last: true,
                data: &[1, 2, 3]
            }),
            Err(Error::InvalidLength)
        );
        assert_eq!(e.state(), State::Idle);
    }

    #[test]
    fn legacy_public_key_address() {
        let mut e = engine(Grammar::Utxo);

        let out = e.update(&Event::GetPublicKey { path: TEST_PATH }).unwrap();
        match out {
            Output::PublicKey { address, .. } => {
                assert_eq!(address.len(), 34);
                assert!(address.starts_with('A'));
            }
            _ => panic!("expected public key"),
        }
    }
}
