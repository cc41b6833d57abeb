use serde_derive::{Deserialize, Serialize};

/// Construction-time settings for a compressed trie.
///
/// # Examples
///
/// ```
/// use compressed_trie::trie::{CompressedTrie, TrieConfig};
///
/// let config = TrieConfig::default().with_merge_on_remove(true);
/// let trie: CompressedTrie<u8> = CompressedTrie::with_config(config);
/// assert!(trie.is_empty());
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TrieConfig {
    /// Number of nodes the arena reserves up front.
    pub initial_capacity: usize,
    /// If `true`, a removal that leaves a non-endpoint node with a single outgoing edge folds that
    /// node into its child, so the tree stays fully path-compressed. Membership is unaffected
    /// either way.
    pub merge_on_remove: bool,
}

impl TrieConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_merge_on_remove(mut self, merge_on_remove: bool) -> Self {
        self.merge_on_remove = merge_on_remove;
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        TrieConfig {
            initial_capacity: 16,
            merge_on_remove: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrieConfig;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_default() {
        let config = TrieConfig::default();
        assert_eq!(config.initial_capacity, 16);
        assert!(!config.merge_on_remove);
    }

    #[test]
    fn test_setters() {
        let config = TrieConfig::default()
            .with_initial_capacity(4)
            .with_merge_on_remove(true);
        assert_eq!(
            config,
            TrieConfig {
                initial_capacity: 4,
                merge_on_remove: true,
            },
        );
    }

    #[test]
    fn test_ser_de() {
        let config = TrieConfig::default().with_merge_on_remove(true);
        assert_tokens(
            &config,
            &[
                Token::Struct {
                    name: "TrieConfig",
                    len: 2,
                },
                Token::Str("initial_capacity"),
                Token::U64(16),
                Token::Str("merge_on_remove"),
                Token::Bool(true),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_de_missing_fields() {
        assert_de_tokens(
            &TrieConfig::default().with_initial_capacity(64),
            &[
                Token::Struct {
                    name: "TrieConfig",
                    len: 1,
                },
                Token::Str("initial_capacity"),
                Token::U64(64),
                Token::StructEnd,
            ],
        );
    }
}
