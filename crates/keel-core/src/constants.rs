//! Protocol constants: network selection and the compiled-in checkpoint table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NetworkParseError;
use crate::types::{Checkpoint, Hash256};

/// Network type: Mainnet or Testnet.
///
/// Selected once at startup and never changed afterwards. Checkpoints are a
/// mainnet-only policy: on testnet every checkpoint operation behaves as if
/// the table were empty.
///
/// # Examples
///
/// ```
/// use keel_core::constants::NetworkType;
/// let net = NetworkType::default();
/// assert_eq!(net, NetworkType::Mainnet);
/// assert!(net.enforces_checkpoints());
/// assert!(!NetworkType::Testnet.enforces_checkpoints());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkType {
    /// Production network.
    #[default]
    Mainnet,
    /// Checkpoint-free development network.
    Testnet,
}

impl NetworkType {
    /// Whether compiled-in checkpoints apply on this network.
    pub fn enforces_checkpoints(&self) -> bool {
        matches!(self, Self::Mainnet)
    }

    /// Lowercase network name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(NetworkParseError::Unknown(s.to_string())),
        }
    }
}

impl Serialize for NetworkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for NetworkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

const fn cp(height: u64, hash: &str) -> Checkpoint {
    Checkpoint::new(height, Hash256::from_hex_const(hash))
}

/// Hard-coded mainnet checkpoints, ascending by height.
///
/// Blocks at these heights must carry exactly these hashes. Adding an entry
/// is a software release, never a runtime configuration change.
pub const MAINNET_CHECKPOINTS: &[Checkpoint] = &[
    cp(0, "bbd01e417e370842498a91038fd40da95f4a6166a231a3bed3c4671207bd8296"),
    cp(25, "52424ba26dd18c2da10170054c8c39ec649d0ac2630585e53099ac70dc360721"),
    cp(125, "a13b9e454a00927f6b6fd59eda118d76b270f09f80ff848e7f3cb9a2f47837ed"),
    cp(1025, "a59d07caeca8b8601803a72729dabb846e4a2adda0022ea212e4911824ff85ae"),
    cp(5025, "dc5ea38e4b4f68e66ec4fe3c7b742f02388bca5d90f3c340675229f8ae23f8ca"),
    cp(10025, "5fac2e11b6ab636534d0dc557f86f302b71647c9084eae6fe2ca389a37bb4e68"),
    cp(11025, "b68d83930c52a880326fdda93fa6963e95133c1592cab5c8488b8aaebb4206b3"),
    cp(13025, "5d5eb98932c5d81a1bac5fc653c2d95e648d089b2a607ca6ac15975bf05af009"),
    cp(15025, "2c4305a5e070e1f470fa3289653db98bd7dd6eb847780d6d32e65d5b901b429f"),
    cp(20025, "38d3027035e4725852203ee4a38768ce3fd12cc8d3d9ee1c00467d17d81c42be"),
    cp(25025, "005df538003a40bc5f83c299397dce6a4d2a736ab4fdf46752a8fcec5a45cf7f"),
    cp(30025, "0c3a6a48a8811b9c1683d86148b40384e0920a4020e0229bb7d3928e4c1e3168"),
    cp(35000, "bc86cab2bf3c1dba06e511b7a0830dd1252b5b860cae1ae90c61c0ff117d191a"),
    cp(40025, "afc48c6b0414bdc09ab31033ed4dd56d76c3fb29bc775060f2e393d58683625a"),
    cp(43665, "a77dbe7205f122896e3f172a0fc7e99d662cf15cf4e92324cbf69a472160a1bd"),
    cp(43869, "a55c9f9c892dc84fc97a670e79d79c3bec8f9dd9e32647fae8d8dcf13351f395"),
    cp(46132, "cab3584e46e2b038475cee3fc151930a5254989973509463cd9ad5980525c59a"),
    cp(46525, "80f62adfbb336b80c66a2eea963a705696f83787f375d72454511cef6db9ae77"),
    cp(47025, "16d4d4462499ade6076ef2996913eb4b91eb6965e9d78b2553a83974ae42b57f"),
    cp(47525, "a881a1f71726e1606211db240ea34f06343418a60739ce53195ddabee302b5de"),
    cp(48025, "b63b43ed40ab1aaec59228dcc11259a8bc1407b20257fd1283d74bc60501a158"),
    cp(48525, "e7754742b376b32a816038256f5277fa073527b6526887484ecbd8439b22eecf"),
    cp(49025, "ef808fbbf7d5588394164b9f6c4190ae895134f1aa0d220f6379394e97ec07d7"),
    cp(50025, "71c30991bff5baeefb2b6d976f9e54c72a25f164c14fe2239b5de248392f9d80"),
    cp(60025, "9d7095a313497f158b65a7832e1434d06a52d76799b4d7c6db6a7f966b488013"),
    cp(65025, "6fa8c8e1980d9929b09e0d8a2536c0fe67f230b02923060ab013d459c2c17184"),
    cp(65525, "ebf93cdd64236622786e8b2b55079f70db658c6b27eccd92574271507789633e"),
    cp(85525, "482eab083d59ff7846dbeedadd5bffbe31737a9ce703d39e35bb39a17982be25"),
    cp(95525, "e66cb922df396e62026b2c2c812690ce962bd3ad2a1e70b6d2f8b60732a9978b"),
    cp(105525, "2ac38e841ca3b8362aa3a7bbf3e757055518a450ce4712c73124be161a03ccc2"),
    cp(110000, "e2d99af9501e8c2af2cce48516b925ac37c60b479530c72c7f9d198f7ee6fa07"),
    cp(120000, "931dc828b580cbafe526c7db7e21fe807cba4fd7c0827e56dcf297267db13ba5"),
    cp(130000, "4ec7cc6e98f87690f90969ff85e2fa133238cb4e80766c0b64796fce5317a902"),
    cp(140000, "fcfd03560902a1b0ae6ba0de86a0992182600d57825b7a9e301fcca77e434c2c"),
];

// A malformed release table must not build.
const _: () = assert!(!MAINNET_CHECKPOINTS.is_empty(), "mainnet checkpoint table is empty");
const _: () = assert!(
    is_strictly_increasing(MAINNET_CHECKPOINTS),
    "mainnet checkpoint heights must be strictly increasing"
);

/// Returns `true` if checkpoint heights strictly increase (sorted, no duplicates).
///
/// Usable in `const` context so compiled-in tables are checked by the compiler.
pub const fn is_strictly_increasing(entries: &[Checkpoint]) -> bool {
    let mut i = 1;
    while i < entries.len() {
        if entries[i].height <= entries[i - 1].height {
            return false;
        }
        i += 1;
    }
    true
}
