//! Prelude re-exporting the APDU types for convenience

pub use crate::{
    public_key::{PublicKeyReq, PublicKeyResp},
    sign::{SignTxChunk, SignatureResp, P1_LAST, P1_MORE},
    encode_bip44, parse_bip44, status,
    ApduError, ApduStatic, Bip44Path, Instruction, BIP44_BYTE_LEN, BIP44_PATH_LEN, NEO_APDU_CLA,
};
