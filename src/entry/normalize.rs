//! Record normalization.
//!
//! Input records arrive in one of three historical shapes. Each shape has its own decoder and the
//! decoders are tried in priority order; the first one that yields a character identity wins:
//!
//! 1. **Modern**: flat object with a string `chu`, array-typed `kun`/`on` and no other keys
//!    than the canonical entry fields.
//! 2. **Collection**: `{ order: [key..], items: { key -> legacy record } }`.
//! 3. **Legacy**: character key plus a free-form info map with compact reading strings.
//!
//! Normalization is pure and idempotent apart from `updatedAt`: feeding a canonical [`Entry`]
//! back in yields the same entry.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::entry::examples::{ExampleSet, parse_example};
use crate::entry::model::{Entry, Example, Reading, SvgLocator, codepoint_hex, default_svg_path};
use crate::foundation::error::NormalizationReject;

const CHAR_KEYS: &[&str] = &["chu", "kanji", "char", "character", "han", "key"];
const HAN_VIET_KEYS: &[&str] = &[
    "hanViet",
    "han_viet",
    "hv",
    "am_han_viet",
    "Hán Việt",
    "Âm Hán Việt",
];
const MEANING_KEYS: &[&str] = &["nghia", "nghĩa", "Nghĩa", "meaning", "meanings"];
const KUN_KEYS: &[&str] = &["kun", "kunyomi", "Kun", "kun_yomi"];
const ON_KEYS: &[&str] = &["on", "onyomi", "On", "on_yomi"];
const RADICAL_KEYS: &[&str] = &["bo", "bộ", "Bộ", "radical"];
const KUN_EXAMPLE_KEYS: &[&str] = &["kunExamples", "kun_examples", "vd_kun"];
const ON_EXAMPLE_KEYS: &[&str] = &["onExamples", "on_examples", "vd_on"];

/// Normalize one raw record, stamping `updatedAt` with the current UTC time.
///
/// Returns `None` when no character identity can be determined.
pub fn normalize(raw: &Value) -> Option<Entry> {
    normalize_at(raw, &now_timestamp())
}

/// Like [`normalize`] but with a caller-supplied `updatedAt`.
pub fn normalize_at(raw: &Value, updated_at: &str) -> Option<Entry> {
    match try_normalize_at(raw, updated_at) {
        Ok(entry) => Some(entry),
        Err(reject) => {
            tracing::debug!(%reject, "dropping record");
            None
        }
    }
}

/// Normalize one raw record, reporting why it was rejected.
pub fn try_normalize(raw: &Value) -> Result<Entry, NormalizationReject> {
    try_normalize_at(raw, &now_timestamp())
}

/// Like [`try_normalize`] but with a caller-supplied `updatedAt`.
pub fn try_normalize_at(raw: &Value, updated_at: &str) -> Result<Entry, NormalizationReject> {
    match RecordShape::decode(raw)? {
        RecordShape::Modern(rec) => rec.into_draft().finish(updated_at),
        RecordShape::Collection(col) => col
            .drafts()
            .into_iter()
            .find_map(|d| d.finish(updated_at).ok())
            .ok_or_else(|| NormalizationReject::new("collection holds no usable record")),
        RecordShape::Legacy(obj) => decode_legacy(obj, None).finish(updated_at),
    }
}

/// Normalize a bulk source: an array of records, a collection, or a single record.
///
/// Rejected records are dropped; they never abort the batch.
#[tracing::instrument(skip(raw))]
pub fn normalize_all(raw: &Value) -> Vec<Entry> {
    let updated_at = now_timestamp();
    let drafts: Vec<Result<Draft, NormalizationReject>> = match raw {
        Value::Array(items) => items
            .iter()
            .map(|item| match RecordShape::decode(item)? {
                RecordShape::Modern(rec) => Ok(rec.into_draft()),
                RecordShape::Legacy(obj) => Ok(decode_legacy(obj, None)),
                RecordShape::Collection(_) => {
                    Err(NormalizationReject::new("nested collection in record array"))
                }
            })
            .collect(),
        other => match RecordShape::decode(other) {
            Ok(RecordShape::Collection(col)) => col.drafts().into_iter().map(Ok).collect(),
            Ok(RecordShape::Modern(rec)) => vec![Ok(rec.into_draft())],
            Ok(RecordShape::Legacy(obj)) => vec![Ok(decode_legacy(obj, None))],
            Err(e) => vec![Err(e)],
        },
    };

    let total = drafts.len();
    let out: Vec<Entry> = drafts
        .into_iter()
        .filter_map(|d| match d.and_then(|d| d.finish(&updated_at)) {
            Ok(entry) => Some(entry),
            Err(reject) => {
                tracing::debug!(%reject, "dropping record from batch");
                None
            }
        })
        .collect();
    tracing::debug!(total, kept = out.len(), "normalized batch");
    out
}

/// Split a compact reading string such as `"ひ -び -か"` into tokens.
///
/// Splits on whitespace and hyphens, trims, drops empties and keeps the first occurrence of each
/// token in order.
pub fn tokenize_readings(compact: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tok in compact.split(|c: char| c.is_whitespace() || matches!(c, '-' | '‐' | '－')) {
        let tok = tok.trim();
        if tok.is_empty() || out.iter().any(|t| t == tok) {
            continue;
        }
        out.push(tok.to_owned());
    }
    out
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

enum RecordShape<'a> {
    Modern(ModernRecord),
    Collection(CollectionRecord<'a>),
    Legacy(&'a Map<String, Value>),
}

impl<'a> RecordShape<'a> {
    fn decode(raw: &'a Value) -> Result<Self, NormalizationReject> {
        let Value::Object(obj) = raw else {
            return Err(NormalizationReject::new("record is not an object"));
        };
        if obj.get("chu").is_some_and(Value::is_string)
            && let Ok(rec) = ModernRecord::deserialize(raw)
        {
            return Ok(Self::Modern(rec));
        }
        if let Some(col) = CollectionRecord::decode(obj) {
            return Ok(Self::Collection(col));
        }
        Ok(Self::Legacy(obj))
    }
}

/// Exactly the canonical [`Entry`] fields; anything else routes the record to the legacy decoder.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ModernRecord {
    chu: String,
    #[serde(default, alias = "han_viet")]
    han_viet: Option<String>,
    #[serde(default)]
    nghia: Option<String>,
    #[serde(default)]
    kun: Vec<RawReading>,
    #[serde(default)]
    on: Vec<RawReading>,
    #[serde(default)]
    bo: Option<String>,
    #[serde(default)]
    svg: Option<RawSvg>,
    #[serde(default, rename = "updatedAt", alias = "updated_at")]
    _updated_at: Option<serde::de::IgnoredAny>,
}

impl ModernRecord {
    fn into_draft(self) -> Draft {
        let mut kun = ReadingList::default();
        kun.extend_raw(self.kun);
        let mut on = ReadingList::default();
        on.extend_raw(self.on);
        Draft {
            chu: Some(self.chu),
            han_viet: self.han_viet,
            nghia: self.nghia,
            kun: kun.into_vec(),
            on: on.into_vec(),
            bo: self.bo,
            svg: self.svg,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReading {
    Text(String),
    Structured {
        am: String,
        #[serde(default)]
        nghia: Option<String>,
        #[serde(default)]
        examples: Vec<RawExample>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExample {
    Text(String),
    Structured {
        #[serde(alias = "word")]
        tu: String,
        #[serde(default, alias = "reading", alias = "kana")]
        hiragana: String,
        #[serde(default, alias = "meaning")]
        nghia: String,
    },
}

impl RawExample {
    fn into_example(self) -> Example {
        match self {
            Self::Text(s) => parse_example(&s),
            Self::Structured {
                tu,
                hiragana,
                nghia,
            } => Example::new(tu.trim(), hiragana.trim(), nghia.trim()),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawSvg {
    #[serde(default, alias = "codepoint_hex")]
    codepoint_hex: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    exists: Option<bool>,
}

struct CollectionRecord<'a> {
    order: Vec<&'a str>,
    items: &'a Map<String, Value>,
}

impl<'a> CollectionRecord<'a> {
    fn decode(obj: &'a Map<String, Value>) -> Option<Self> {
        let items = obj.get("items")?.as_object()?;
        let order: Vec<&str> = match obj.get("order") {
            Some(Value::Array(keys)) => keys.iter().filter_map(Value::as_str).collect(),
            Some(_) => return None,
            None => items.keys().map(String::as_str).collect(),
        };
        Some(Self { order, items })
    }

    fn drafts(&self) -> Vec<Draft> {
        self.order
            .iter()
            .filter_map(|key| {
                let item = self.items.get(*key)?;
                match item {
                    Value::Object(rec) => Some(decode_legacy(rec, Some(*key))),
                    _ => {
                        tracing::debug!(key = *key, "collection item is not an object");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Shape-independent intermediate; `finish` applies identity checks and defaults.
struct Draft {
    chu: Option<String>,
    han_viet: Option<String>,
    nghia: Option<String>,
    kun: Vec<Reading>,
    on: Vec<Reading>,
    bo: Option<String>,
    svg: Option<RawSvg>,
}

impl Draft {
    fn finish(self, updated_at: &str) -> Result<Entry, NormalizationReject> {
        let chu = self.chu.as_deref().map(str::trim).unwrap_or_default();
        if chu.is_empty() {
            return Err(NormalizationReject::new("no character identity"));
        }

        let raw_svg = self.svg.unwrap_or_default();
        let codepoint_hex = non_empty(raw_svg.codepoint_hex)
            .map(|h| h.to_lowercase())
            .or_else(|| codepoint_hex(chu))
            .ok_or_else(|| NormalizationReject::new("no code point for character"))?;
        let path = non_empty(raw_svg.path).unwrap_or_else(|| default_svg_path(&codepoint_hex));

        Ok(Entry {
            chu: chu.to_owned(),
            han_viet: non_empty(self.han_viet).unwrap_or_default(),
            nghia: non_empty(self.nghia).unwrap_or_default(),
            kun: self.kun,
            on: self.on,
            bo: non_empty(self.bo),
            svg: SvgLocator {
                codepoint_hex,
                path,
                exists: raw_svg.exists.unwrap_or(true),
            },
            updated_at: updated_at.to_owned(),
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    let s = s?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else if t.len() == s.len() {
        Some(s)
    } else {
        Some(t.to_owned())
    }
}

/// Reading list that keeps pronunciation tokens unique, first occurrence first.
#[derive(Default)]
struct ReadingList {
    items: Vec<Reading>,
}

impl ReadingList {
    fn push_token(&mut self, am: &str) {
        let am = am.trim();
        if am.is_empty() || self.items.iter().any(|r| r.am == am) {
            return;
        }
        self.items.push(Reading::plain(am));
    }

    fn push_compact(&mut self, compact: &str) {
        for tok in tokenize_readings(compact) {
            self.push_token(&tok);
        }
    }

    fn push_structured(&mut self, am: &str, nghia: Option<String>, examples: Vec<Example>) {
        let am = am.trim();
        if am.is_empty() {
            return;
        }
        let nghia = non_empty(nghia);
        match self.items.iter_mut().find(|r| r.am == am) {
            Some(existing) => {
                if existing.nghia.is_none() {
                    existing.nghia = nghia;
                }
                let merged: ExampleSet = std::mem::take(&mut existing.examples)
                    .into_iter()
                    .chain(examples)
                    .collect();
                existing.examples = merged.into_vec();
            }
            None => {
                let examples: ExampleSet = examples.into_iter().collect();
                self.items.push(Reading {
                    am: am.to_owned(),
                    nghia,
                    examples: examples.into_vec(),
                });
            }
        }
    }

    fn extend_raw(&mut self, raw: Vec<RawReading>) {
        for r in raw {
            match r {
                RawReading::Text(s) => self.push_compact(&s),
                RawReading::Structured {
                    am,
                    nghia,
                    examples,
                } => {
                    let examples = examples.into_iter().map(RawExample::into_example).collect();
                    self.push_structured(&am, nghia, examples);
                }
            }
        }
    }

    fn extend_value(&mut self, value: &Value) {
        match value {
            Value::String(s) => self.push_compact(s),
            Value::Array(items) => {
                let raw = items
                    .iter()
                    .filter_map(|v| RawReading::deserialize(v).ok())
                    .collect();
                self.extend_raw(raw);
            }
            _ => {}
        }
    }

    /// Attach examples to the first reading; dropped when the list is empty.
    fn attach_examples(&mut self, examples: Vec<Example>) {
        if examples.is_empty() {
            return;
        }
        let Some(first) = self.items.first_mut() else {
            tracing::debug!(count = examples.len(), "examples without a reading to attach to");
            return;
        };
        let merged: ExampleSet = std::mem::take(&mut first.examples)
            .into_iter()
            .chain(examples)
            .collect();
        first.examples = merged.into_vec();
    }

    fn into_vec(self) -> Vec<Reading> {
        self.items
    }
}

/// Maps searched for a concept, most specific first.
struct LegacyFields<'a> {
    maps: Vec<&'a Map<String, Value>>,
}

impl<'a> LegacyFields<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        let mut maps = Vec::with_capacity(2);
        if let Some(info) = obj.get("info").and_then(Value::as_object) {
            maps.push(info);
        }
        maps.push(obj);
        Self { maps }
    }

    /// First non-null value under any candidate key, candidates in priority order.
    fn lookup(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|k| {
            self.maps
                .iter()
                .copied()
                .find_map(|m| m.get(*k).filter(|v| !v.is_null()))
        })
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        match self.lookup(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<&str> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                Some(parts.join(", "))
            }
            _ => None,
        }
    }

    fn readings(&self, keys: &[&str], example_keys: &[&str]) -> Vec<Reading> {
        let mut list = ReadingList::default();
        if let Some(v) = self.lookup(keys) {
            list.extend_value(v);
        }
        if let Some(v) = self.lookup(example_keys) {
            list.attach_examples(examples_from_value(v));
        }
        list.into_vec()
    }
}

fn examples_from_value(value: &Value) -> Vec<Example> {
    let mut set = ExampleSet::new();
    match value {
        Value::String(s) => {
            for line in s.split(['\n', ';', '；']) {
                if !line.trim().is_empty() {
                    set.insert_text(line);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if let Ok(raw) = RawExample::deserialize(item) {
                    set.insert(raw.into_example());
                }
            }
        }
        _ => {}
    }
    set.into_vec()
}

fn decode_legacy(obj: &Map<String, Value>, key_hint: Option<&str>) -> Draft {
    let fields = LegacyFields::new(obj);
    let chu = fields
        .text(CHAR_KEYS)
        .filter(|c| !c.trim().is_empty())
        .or_else(|| key_hint.map(str::to_owned));
    let svg = obj.get("svg").and_then(|v| RawSvg::deserialize(v).ok());

    Draft {
        chu,
        han_viet: fields.text(HAN_VIET_KEYS),
        nghia: fields.text(MEANING_KEYS),
        kun: fields.readings(KUN_KEYS, KUN_EXAMPLE_KEYS),
        on: fields.readings(ON_KEYS, ON_EXAMPLE_KEYS),
        bo: fields.text(RADICAL_KEYS),
        svg,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entry/normalize.rs"]
mod tests;
