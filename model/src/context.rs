//! JSON-LD term expansion and compaction.
//!
//! A [`ContextResolver`] holds an ordered list of [`ContextDocument`]s and
//! turns short terms into absolute IRIs (`expand_*`) and back
//! (`compact_*`). Three flavours exist for each direction:
//!
//! - `*_iri`: plain terms and `prefix:suffix` compact IRIs.
//! - `*_id`: as `*_iri`, plus `@base` for relative identifiers.
//! - `*_vocab`: as `*_id`, plus `@vocab` and any nested context declared
//!   for the active vocabulary (see [`ContextResolver::vocab_push`]).
//!
//! Resolution never fails. An identifier with no applicable entry comes
//! back unchanged.
//!
//! ```
//! use serde_json::json;
//! use shaclc_model::context::ContextResolver;
//!
//! let ctx = ContextResolver::from_json_documents(&[json!({"ex": "http://example.org/"})])
//!     .expect("valid context");
//! assert_eq!(ctx.expand_iri("ex:Foo"), "http://example.org/Foo");
//! assert_eq!(ctx.compact_iri("http://example.org/Foo"), "ex:Foo");
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Deref;

use serde_json::{Map, Value};

use crate::error::ContextError;

/// Compaction candidates may themselves compact further; bound the chain.
const MAX_COMPACT_DEPTH: usize = 8;

/// The `@type` of an expanded term definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermType {
    /// `"@type": "@id"`: values are node identifiers.
    Id,
    /// `"@type": "@vocab"`: values are vocabulary terms.
    Vocab,
    /// Any other value: a datatype IRI (possibly compact).
    Datatype(String),
}

impl TermType {
    fn parse(value: &str) -> Self {
        match value {
            "@id" => TermType::Id,
            "@vocab" => TermType::Vocab,
            other => TermType::Datatype(other.to_string()),
        }
    }
}

/// A single term definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDefinition {
    /// The `@id` the term maps to. May itself be a term or compact IRI.
    pub id: String,
    /// Optional `@type`.
    pub type_: Option<TermType>,
    /// Nested `@context`, active while this term's vocabulary is in scope.
    pub context: Option<ContextDocument>,
}

/// One parsed JSON-LD context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextDocument {
    /// `@base`, applied to relative identifiers.
    pub base: Option<String>,
    /// `@vocab`, applied to relative vocabulary terms.
    pub vocab: Option<String>,
    /// Term definitions keyed by term.
    pub terms: BTreeMap<String, TermDefinition>,
}

impl ContextDocument {
    /// Parses a context from JSON.
    ///
    /// Accepts a bare context object, a document wrapping it in `@context`,
    /// an array of either (merged in order), or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Invalid`] for string (remote) contexts and for
    /// term definitions that are neither a string, `null`, nor an object.
    pub fn from_json(value: &Value) -> Result<Self, ContextError> {
        let mut doc = ContextDocument::default();
        doc.merge_json(value)?;
        Ok(doc)
    }

    /// Returns true if the document defines nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.vocab.is_none() && self.terms.is_empty()
    }

    fn merge_json(&mut self, value: &Value) -> Result<(), ContextError> {
        match value {
            Value::Null => Ok(()),
            Value::Array(items) => {
                for item in items {
                    self.merge_json(item)?;
                }
                Ok(())
            }
            Value::Object(map) => match map.get("@context") {
                Some(inner) => self.merge_json(inner),
                None => self.merge_map(map),
            },
            Value::String(url) => Err(ContextError::Invalid {
                message: format!("remote context {url} must be loaded before resolution"),
            }),
            other => Err(ContextError::Invalid {
                message: format!("expected an object, array, or null context, got {other}"),
            }),
        }
    }

    fn merge_map(&mut self, map: &Map<String, Value>) -> Result<(), ContextError> {
        for (key, value) in map {
            match key.as_str() {
                "@base" => self.base = keyword_iri(key, value)?,
                "@vocab" => self.vocab = keyword_iri(key, value)?,
                k if k.starts_with('@') => {}
                _ => match parse_term(key, value)? {
                    Some(def) => {
                        self.terms.insert(key.clone(), def);
                    }
                    None => {
                        self.terms.remove(key);
                    }
                },
            }
        }
        Ok(())
    }
}

fn keyword_iri(keyword: &str, value: &Value) -> Result<Option<String>, ContextError> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        other => Err(ContextError::Invalid {
            message: format!("{keyword} must be a string or null, got {other}"),
        }),
    }
}

fn parse_term(term: &str, value: &Value) -> Result<Option<TermDefinition>, ContextError> {
    match value {
        Value::Null => Ok(None),
        Value::String(id) => Ok(Some(TermDefinition {
            id: id.clone(),
            type_: None,
            context: None,
        })),
        Value::Object(map) => {
            let id = match map.get("@id") {
                Some(Value::String(id)) => id.clone(),
                None | Some(Value::Null) => return Ok(None),
                Some(other) => {
                    return Err(ContextError::Invalid {
                        message: format!("@id of term '{term}' must be a string, got {other}"),
                    })
                }
            };
            let type_ = match map.get("@type") {
                Some(Value::String(t)) => Some(TermType::parse(t)),
                None | Some(Value::Null) => None,
                Some(other) => {
                    return Err(ContextError::Invalid {
                        message: format!("@type of term '{term}' must be a string, got {other}"),
                    })
                }
            };
            let context = match map.get("@context") {
                Some(nested) => Some(ContextDocument::from_json(nested)?),
                None => None,
            };
            Ok(Some(TermDefinition { id, type_, context }))
        }
        other => Err(ContextError::Invalid {
            message: format!("definition of term '{term}' has unsupported shape {other}"),
        }),
    }
}

/// Returns true if `id` has no `scheme:`-style prefix.
///
/// `foo` and `:foo` are relative; `_:b0`, `http:foo`, and
/// `http://example.org/` are not.
#[must_use]
pub fn is_relative(id: &str) -> bool {
    !matches!(id.find(':'), Some(pos) if pos > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Operation {
    ExpandIri,
    ExpandId,
    ExpandVocab,
    CompactIri,
    CompactId,
    CompactVocab,
}

impl Operation {
    fn is_expansion(self) -> bool {
        matches!(
            self,
            Operation::ExpandIri | Operation::ExpandId | Operation::ExpandVocab
        )
    }

    fn is_scoped(self) -> bool {
        matches!(self, Operation::ExpandVocab | Operation::CompactVocab)
    }
}

/// `(operation, vocabulary scope, input)`.
type CacheKey = (Operation, String, String);

/// Memoized results for one resolver.
#[derive(Debug, Default)]
struct ResolverCache {
    expanded: HashMap<CacheKey, String>,
    compacted: HashMap<CacheKey, String>,
}

impl ResolverCache {
    fn get(&self, key: &CacheKey) -> Option<String> {
        let map = if key.0.is_expansion() {
            &self.expanded
        } else {
            &self.compacted
        };
        map.get(key).cloned()
    }

    fn insert(&mut self, key: CacheKey, value: String) {
        let map = if key.0.is_expansion() {
            &mut self.expanded
        } else {
            &mut self.compacted
        };
        map.insert(key, value);
    }
}

/// Which defaults an expansion may apply to a relative identifier.
#[derive(Debug, Clone, Copy)]
struct ExpandRules {
    base: bool,
    vocab: bool,
}

impl ExpandRules {
    const TERMS: ExpandRules = ExpandRules {
        base: false,
        vocab: false,
    };
}

/// Which defaults a compaction may strip.
#[derive(Debug, Clone, Copy)]
struct CompactRules {
    base: bool,
    vocab: bool,
}

impl From<CompactRules> for ExpandRules {
    fn from(rules: CompactRules) -> Self {
        ExpandRules {
            base: rules.base,
            vocab: rules.vocab,
        }
    }
}

/// Resolves identifiers between compact and expanded form.
///
/// The resolver owns its memoization caches and the vocabulary stack. Both
/// live behind `RefCell`, so a resolver serves one thread; give each
/// compiler invocation its own instance.
#[derive(Debug, Default)]
pub struct ContextResolver {
    contexts: Vec<ContextDocument>,
    vocabs: RefCell<Vec<String>>,
    cache: RefCell<ResolverCache>,
}

/// Guard returned by [`ContextResolver::vocab_push`].
///
/// Dereferences to the resolver. Dropping it pops the vocabulary it pushed,
/// so the stack stays balanced on every exit path.
#[derive(Debug)]
pub struct VocabScope<'a> {
    resolver: &'a ContextResolver,
    pushed: bool,
}

impl Deref for VocabScope<'_> {
    type Target = ContextResolver;

    fn deref(&self) -> &ContextResolver {
        self.resolver
    }
}

impl Drop for VocabScope<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.resolver.vocabs.borrow_mut().pop();
        }
    }
}

impl ContextResolver {
    /// Creates a resolver over `contexts`, highest priority first.
    ///
    /// Empty documents are dropped.
    #[must_use]
    pub fn new(contexts: Vec<ContextDocument>) -> Self {
        Self {
            contexts: contexts.into_iter().filter(|c| !c.is_empty()).collect(),
            vocabs: RefCell::new(Vec::new()),
            cache: RefCell::new(ResolverCache::default()),
        }
    }

    /// Parses each JSON value with [`ContextDocument::from_json`] and builds
    /// a resolver over the results.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContextError`] encountered.
    pub fn from_json_documents(documents: &[Value]) -> Result<Self, ContextError> {
        let contexts = documents
            .iter()
            .map(ContextDocument::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(contexts))
    }

    /// The context documents this resolver consults.
    #[must_use]
    pub fn contexts(&self) -> &[ContextDocument] {
        &self.contexts
    }

    /// Makes `vocab` the active vocabulary until the returned guard drops.
    ///
    /// `None` and `""` push nothing; the guard is then inert.
    pub fn vocab_push(&self, vocab: Option<&str>) -> VocabScope<'_> {
        let pushed = match vocab {
            Some(v) if !v.is_empty() => {
                self.vocabs.borrow_mut().push(v.to_string());
                true
            }
            _ => false,
        };
        VocabScope {
            resolver: self,
            pushed,
        }
    }

    /// The innermost active vocabulary, if any.
    #[must_use]
    pub fn current_vocab(&self) -> Option<String> {
        self.vocabs.borrow().last().cloned()
    }

    /// Expands a vocabulary term or compact IRI to an absolute IRI.
    #[must_use]
    pub fn expand_iri(&self, term: &str) -> String {
        self.cached(Operation::ExpandIri, term, || {
            self.expand_with(term, &self.base_contexts(), ExpandRules::TERMS)
        })
    }

    /// Expands a node identifier, applying `@base` to relative identifiers.
    #[must_use]
    pub fn expand_id(&self, id: &str) -> String {
        self.cached(Operation::ExpandId, id, || {
            let rules = ExpandRules {
                base: true,
                vocab: false,
            };
            self.expand_with(id, &self.base_contexts(), rules)
        })
    }

    /// Expands `term` with `vocab` active (in addition to any vocabulary
    /// already pushed), applying `@vocab` and `@base` to relative terms.
    #[must_use]
    pub fn expand_vocab(&self, term: &str, vocab: Option<&str>) -> String {
        let _scope = self.vocab_push(vocab);
        self.cached(Operation::ExpandVocab, term, || {
            let mut contexts = self.vocab_contexts();
            contexts.extend(self.base_contexts());
            let rules = ExpandRules {
                base: true,
                vocab: true,
            };
            self.expand_with(term, &contexts, rules)
        })
    }

    /// Compacts an absolute IRI to the best available term.
    #[must_use]
    pub fn compact_iri(&self, iri: &str) -> String {
        self.cached(Operation::CompactIri, iri, || {
            let rules = CompactRules {
                base: false,
                vocab: false,
            };
            self.compact_with(iri, &[], &self.base_contexts(), rules)
                .unwrap_or_else(|| iri.to_string())
        })
    }

    /// Compacts a node identifier, also considering `@base`.
    #[must_use]
    pub fn compact_id(&self, id: &str) -> String {
        self.cached(Operation::CompactId, id, || {
            let rules = CompactRules {
                base: true,
                vocab: false,
            };
            self.compact_with(id, &[], &self.base_contexts(), rules)
                .unwrap_or_else(|| id.to_string())
        })
    }

    /// Compacts `iri` as a vocabulary term with `vocab` active.
    ///
    /// `@vocab` is only stripped when declared by a vocabulary-scoped nested
    /// context. Falls back to [`ContextResolver::compact_id`].
    #[must_use]
    pub fn compact_vocab(&self, iri: &str, vocab: Option<&str>) -> String {
        let _scope = self.vocab_push(vocab);
        self.cached(Operation::CompactVocab, iri, || {
            let rules = CompactRules {
                base: false,
                vocab: true,
            };
            let scoped = self.vocab_contexts();
            self.compact_with(iri, &scoped, &self.base_contexts(), rules)
                .unwrap_or_else(|| self.compact_id(iri))
        })
    }

    fn cached(&self, op: Operation, input: &str, compute: impl FnOnce() -> String) -> String {
        let scope = if op.is_scoped() {
            self.vocabs.borrow().join(" ")
        } else {
            String::new()
        };
        let key = (op, scope, input.to_string());
        let hit = self.cache.borrow().get(&key);
        if let Some(hit) = hit {
            return hit;
        }
        let value = compute();
        self.cache.borrow_mut().insert(key, value.clone());
        value
    }

    fn base_contexts(&self) -> Vec<&ContextDocument> {
        self.contexts.iter().collect()
    }

    /// Nested contexts of every `@vocab`-typed term whose IRI is on the
    /// vocabulary stack, most recently pushed first.
    fn vocab_contexts(&self) -> Vec<&ContextDocument> {
        let vocabs = self.vocabs.borrow().clone();
        let mut scoped = Vec::new();
        for vocab in &vocabs {
            for ctx in &self.contexts {
                for def in ctx.terms.values() {
                    let Some(nested) = &def.context else {
                        continue;
                    };
                    if def.type_ == Some(TermType::Vocab) && self.expand_iri(&def.id) == *vocab {
                        scoped.insert(0, nested);
                    }
                }
            }
        }
        scoped
    }

    fn expand_with(&self, term: &str, contexts: &[&ContextDocument], rules: ExpandRules) -> String {
        let mut visited = BTreeSet::new();
        self.expand_term(term, contexts, rules, &mut visited)
    }

    fn expand_term(
        &self,
        term: &str,
        contexts: &[&ContextDocument],
        rules: ExpandRules,
        visited: &mut BTreeSet<String>,
    ) -> String {
        if term.starts_with('@') || !visited.insert(term.to_string()) {
            return term.to_string();
        }

        if let Some(def) = contexts.iter().find_map(|ctx| ctx.terms.get(term)) {
            return self.expand_term(&def.id, contexts, ExpandRules::TERMS, visited);
        }

        if let Some((prefix, suffix)) = term.split_once(':') {
            if contexts.iter().any(|ctx| ctx.terms.contains_key(prefix)) {
                let expanded = self.expand_term(prefix, contexts, ExpandRules::TERMS, visited);
                if expanded.ends_with('/') {
                    return format!("{expanded}{suffix}");
                }
            }
        }

        if is_relative(term) {
            if rules.vocab {
                if let Some(vocab) = contexts.iter().find_map(|ctx| ctx.vocab.as_deref()) {
                    let vocab = self.expand_with(vocab, contexts, ExpandRules::TERMS);
                    return format!("{vocab}{term}");
                }
            }
            if rules.base {
                if let Some(base) = contexts.iter().find_map(|ctx| ctx.base.as_deref()) {
                    return format!("{base}{term}");
                }
            }
        }

        term.to_string()
    }

    /// Collects every compacted form of `iri` reachable through `scoped`
    /// and `contexts`, keeps those that expand back to `iri`, then picks
    /// the one with the fewest `:`, then the shortest, then the
    /// lexicographically first.
    fn compact_with(
        &self,
        iri: &str,
        scoped: &[&ContextDocument],
        contexts: &[&ContextDocument],
        rules: CompactRules,
    ) -> Option<String> {
        let mut all: Vec<&ContextDocument> = scoped.to_vec();
        all.extend_from_slice(contexts);

        let mut found = BTreeSet::new();
        self.collect_candidates(iri, scoped, &all, rules, 0, &mut found);

        // A candidate must expand back to `iri` under the matching rules.
        let inverse = ExpandRules::from(rules);
        found
            .into_iter()
            .filter(|candidate| self.expand_with(candidate, &all, inverse) == iri)
            .min_by(|a, b| candidate_rank(a).cmp(&candidate_rank(b)))
    }

    fn collect_candidates(
        &self,
        iri: &str,
        scoped: &[&ContextDocument],
        all: &[&ContextDocument],
        rules: CompactRules,
        depth: usize,
        found: &mut BTreeSet<String>,
    ) {
        if depth >= MAX_COMPACT_DEPTH {
            return;
        }

        let mut next = Vec::new();
        for (index, ctx) in all.iter().enumerate() {
            let in_scope = index < scoped.len();

            if rules.vocab && in_scope {
                if let Some(vocab) = &ctx.vocab {
                    let vocab = self.expand_with(vocab, all, ExpandRules::TERMS);
                    strip_into(iri, &vocab, &mut next);
                }
            }
            if rules.base && !in_scope {
                if let Some(base) = &ctx.base {
                    strip_into(iri, base, &mut next);
                }
            }

            for (name, def) in &ctx.terms {
                if iri == def.id {
                    next.push(name.clone());
                } else if let Some(rest) = iri.strip_prefix(def.id.as_str()) {
                    // Only namespace-like prefixes may take a suffix.
                    if self.expand_with(&def.id, all, ExpandRules::TERMS).ends_with('/') {
                        next.push(format!("{name}:{rest}"));
                    }
                }
            }
        }

        for candidate in next {
            if found.insert(candidate.clone()) {
                self.collect_candidates(&candidate, scoped, all, rules, depth + 1, found);
            }
        }
    }
}

fn strip_into(iri: &str, prefix: &str, out: &mut Vec<String>) {
    if let Some(rest) = iri.strip_prefix(prefix) {
        if !rest.is_empty() {
            out.push(rest.to_string());
        }
    }
}

fn candidate_rank(candidate: &str) -> (usize, usize, &str) {
    (candidate.matches(':').count(), candidate.len(), candidate)
}
