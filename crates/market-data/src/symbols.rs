//! Static name/ticker → trading pair table and whole-word resolution over it.

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Built-in entries. Order matters: the first key found in a message wins.
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("bitcoin", "BTC/USDT"),
    ("btc", "BTC/USDT"),
    ("ethereum", "ETH/USDT"),
    ("eth", "ETH/USDT"),
    ("uniswap", "UNI/USDT"),
    ("uni", "UNI/USDT"),
    ("ripple", "XRP/USDT"),
    ("xrp", "XRP/USDT"),
    ("litecoin", "LTC/USDT"),
    ("ltc", "LTC/USDT"),
    ("cardano", "ADA/USDT"),
    ("ada", "ADA/USDT"),
    ("polkadot", "DOT/USDT"),
    ("dot", "DOT/USDT"),
    ("chainlink", "LINK/USDT"),
    ("link", "LINK/USDT"),
    ("dogecoin", "DOGE/USDT"),
    ("doge", "DOGE/USDT"),
    ("stellar", "XLM/USDT"),
    ("xlm", "XLM/USDT"),
    ("shiba inu", "SHIB/USDT"),
    ("shib", "SHIB/USDT"),
    ("avalanche", "AVAX/USDT"),
    ("avax", "AVAX/USDT"),
    ("solana", "SOL/USDT"),
    ("sol", "SOL/USDT"),
    ("tron", "TRX/USDT"),
    ("trx", "TRX/USDT"),
    ("bitcoin cash", "BCH/USDT"),
    ("bch", "BCH/USDT"),
    ("vechain", "VET/USDT"),
    ("vet", "VET/USDT"),
    ("filecoin", "FIL/USDT"),
    ("fil", "FIL/USDT"),
    ("matic", "MATIC/USDT"),
    ("polygon", "MATIC/USDT"),
    ("quant", "QNT/USDT"),
    ("bore", "BORA/USDT"),
];

/// Ordered, immutable mapping from lowercase name/ticker to trading pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoSymbolMap {
    entries: Vec<(String, String)>,
}

impl CryptoSymbolMap {
    /// Builds a map from `(name, pair)` entries, keeping their order.
    /// Names are trimmed and lowercased; empty names are skipped; a repeated name keeps its first pair.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut out: Vec<(String, String)> = Vec::new();
        for (name, pair) in entries {
            let name = name.as_ref().trim().to_lowercase();
            if name.is_empty() || out.iter().any(|(k, _)| *k == name) {
                continue;
            }
            out.push((name, pair.into()));
        }
        Self { entries: out }
    }

    /// Pair for an exact (case-insensitive) name, without word search.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CryptoSymbolMap {
    fn default() -> Self {
        Self::from_entries(DEFAULT_ENTRIES.iter().copied())
    }
}

/// Finds the first table entry mentioned as a whole word in a text.
#[derive(Debug, Clone)]
pub struct SymbolResolver {
    patterns: Vec<(Regex, String)>,
}

impl SymbolResolver {
    pub fn new(map: &CryptoSymbolMap) -> Self {
        let patterns = map
            .iter()
            .filter_map(|(name, pair)| {
                RegexBuilder::new(&format!(r"\b{}\b", regex::escape(name)))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (re, pair.to_string()))
            })
            .collect();
        Self { patterns }
    }

    /// Trading pair of the first key (in table order) that appears in `text` as a delimited word.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        let found = self
            .patterns
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, pair)| pair.as_str());
        debug!(symbol = ?found, "symbol resolution");
        found
    }
}

impl Default for SymbolResolver {
    fn default() -> Self {
        Self::new(&CryptoSymbolMap::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_keeps_table_order() {
        let map = CryptoSymbolMap::default();
        let first: Vec<&str> = map.iter().take(3).map(|(k, _)| k).collect();
        assert_eq!(first, vec!["bitcoin", "btc", "ethereum"]);
        assert_eq!(map.len(), DEFAULT_ENTRIES.len());
        assert_eq!(map.get("Polygon"), Some("MATIC/USDT"));
    }

    #[test]
    fn test_from_entries_normalizes_and_dedups() {
        let map = CryptoSymbolMap::from_entries(vec![
            ("  Monero ", "XMR/USDT"),
            ("", "NONE/USDT"),
            ("monero", "OTHER/USDT"),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("monero"), Some("XMR/USDT"));
    }

    #[test]
    fn test_resolve_every_mapped_name() {
        let map = CryptoSymbolMap::default();
        let resolver = SymbolResolver::new(&map);
        for (name, pair) in map.iter() {
            let text = format!("what is the price of {} today?", name);
            let resolved = resolver.resolve(&text).unwrap();
            // "bitcoin cash" hits "bitcoin" first; table order wins.
            if name == "bitcoin cash" {
                assert_eq!(resolved, "BTC/USDT");
            } else {
                assert_eq!(resolved, pair, "name {}", name);
            }
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let resolver = SymbolResolver::default();
        for text in ["Bitcoin", "BITCOIN", "bitcoin", "price of BiTcOiN?"] {
            assert_eq!(resolver.resolve(text), Some("BTC/USDT"));
        }
    }

    #[test]
    fn test_resolve_requires_word_boundary() {
        let resolver = SymbolResolver::default();
        assert_eq!(resolver.resolve("BTCX"), None);
        assert_eq!(resolver.resolve("price of dogelon"), None);
        assert_eq!(resolver.resolve("the unicorn is soldering"), None);
        assert_eq!(resolver.resolve("eth."), Some("ETH/USDT"));
        assert_eq!(resolver.resolve("(sol)"), Some("SOL/USDT"));
    }

    #[test]
    fn test_resolve_multi_word_name() {
        let resolver = SymbolResolver::default();
        assert_eq!(resolver.resolve("how is shiba  inu"), None);
        assert_eq!(resolver.resolve("how is Shiba Inu doing"), Some("SHIB/USDT"));
    }

    #[test]
    fn test_resolve_multiple_names_uses_table_order() {
        let resolver = SymbolResolver::default();
        assert_eq!(
            resolver.resolve("solana or ethereum, which one?"),
            Some("ETH/USDT")
        );
    }

    #[test]
    fn test_resolve_unmapped_text_returns_none() {
        let resolver = SymbolResolver::default();
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("what do you think about inflation?"), None);
    }
}
