//! Thin wrapper over `kdl` types so the config loader never touches
//! entries or spans directly.

use super::ConfigError;

/// Parsed KDL document paired with its source text, for line-number reporting.
pub(super) struct KdlSource<'a> {
    doc: &'a kdl::KdlDocument,
    source: &'a str,
}

/// Single KDL node with the source it came from.
pub(super) struct SettingNode<'a> {
    node: &'a kdl::KdlNode,
    source: &'a str,
}

/// Parse KDL text, mapping syntax errors to [`ConfigError::ParseError`].
pub(super) fn parse_document(source: &str) -> Result<kdl::KdlDocument, ConfigError> {
    source
        .parse()
        .map_err(|e: kdl::KdlError| ConfigError::ParseError(e.to_string()))
}

impl<'a> KdlSource<'a> {
    pub(super) fn new(doc: &'a kdl::KdlDocument, source: &'a str) -> Self {
        Self { doc, source }
    }

    /// Children of the named top-level block, e.g. `pre-push { … }`.
    pub(super) fn section(&self, name: &str) -> Option<KdlSource<'a>> {
        self.doc
            .get(name)
            .and_then(|n| n.children())
            .map(|doc| KdlSource {
                doc,
                source: self.source,
            })
    }

    pub(super) fn nodes(&self) -> Vec<SettingNode<'a>> {
        self.doc
            .nodes()
            .iter()
            .map(|node| SettingNode {
                node,
                source: self.source,
            })
            .collect()
    }
}

impl<'a> SettingNode<'a> {
    pub(super) fn name(&self) -> &str {
        self.node.name().value()
    }

    /// All string-valued entries, in order. Non-string entries are skipped.
    pub(super) fn string_values(&self) -> Vec<&'a str> {
        self.node
            .entries()
            .iter()
            .filter_map(|e| e.value().as_string())
            .collect()
    }

    /// Number of entries of any type.
    pub(super) fn entry_count(&self) -> usize {
        self.node.entries().len()
    }

    /// 1-based line number of this node in the config text.
    pub(super) fn line(&self) -> usize {
        let offset = self.node.span().offset();
        self.source[..offset.min(self.source.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1
    }

    /// Build a validation error pointing at this node.
    pub(super) fn invalid(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::ValidationError {
            line: self.line(),
            message: message.into(),
        }
    }
}
