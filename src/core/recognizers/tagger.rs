use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTag {
    PersonalName,
    OrganizationName,
}

/// A consecutive word span of the tagged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedSpan<'a> {
    pub tag: NameTag,
    pub text: &'a str,
}

/// Named-entity capability used by the card holder recognizer.
///
/// Implementations yield spans in text order; adjacent words of one name are
/// joined into a single span.
pub trait NameTagger: Send + Sync {
    fn tag<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = TaggedSpan<'a>> + 'a>;
}

pub struct MockNameTagger {
    // spans reported whenever they occur in the input
    known: Vec<(NameTag, String)>,
}

impl MockNameTagger {
    pub fn new() -> Self {
        Self { known: Vec::new() }
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: names
                .into_iter()
                .map(|n| (NameTag::PersonalName, n.into()))
                .collect(),
        }
    }

    pub fn with_spans(spans: Vec<(NameTag, String)>) -> Self {
        Self { known: spans }
    }
}

impl Default for MockNameTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl NameTagger for MockNameTagger {
    fn tag<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = TaggedSpan<'a>> + 'a> {
        let mut spans: Vec<(usize, TaggedSpan<'a>)> = self
            .known
            .iter()
            .filter(|(_, name)| !name.is_empty())
            .filter_map(|(tag, name)| {
                text.find(name.as_str()).map(|start| {
                    (
                        start,
                        TaggedSpan {
                            tag: *tag,
                            text: &text[start..start + name.len()],
                        },
                    )
                })
            })
            .collect();
        spans.sort_by_key(|(start, _)| *start);
        Box::new(spans.into_iter().map(|(_, span)| span))
    }
}

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z'\-]*\.?").expect("word pattern must compile"));

/// Words that mark the surrounding run as an organization.
const ORGANIZATION_WORDS: &[&str] = &[
    "BANCO", "BANQUE", "CORP", "CORPORATION", "CO", "COMPANY", "CU", "FINANCIAL", "GMBH",
    "GROUP", "INC", "LLC", "LTD", "PLC", "SA", "TRUST", "UNION",
];

/// Issuer brands printed on the card face. They form their own organization
/// run and never merge into a neighbouring name.
const ISSUER_WORDS: &[&str] = &[
    "ABN", "AMRO", "BARCLAYCARD", "BARCLAYS", "BBVA", "BMO", "BNP", "CAPITAL", "CHASE", "CIBC",
    "CITI", "CITIBANK", "COMMERZBANK", "DEUTSCHE", "FARGO", "HALIFAX", "HSBC", "ING", "LLOYDS",
    "MONZO", "NATWEST", "ONE", "PARIBAS", "PNC", "RABOBANK", "RBC", "REVOLUT", "SANTANDER",
    "SCOTIABANK", "TD", "USAA", "WELLS",
];

/// Card face words that are never part of a holder name and break a run.
const STOP_WORDS: &[&str] = &[
    "ELECTRONIC", "USE", "ONLY", "MEMBER", "SINCE", "EXPIRES", "EXP", "END", "PLATINUM",
    "GOLD", "CLASSIC", "WORLD", "ELITE", "SIGNATURE", "INFINITE", "PREMIER", "REWARDS",
    "CONTACTLESS", "AUTHORIZED", "NOT", "TRANSFERABLE", "CUSTOMER", "SERVICE",
];

/// Rule-based stand-in for a linguistic tagger, tuned for embossed card text:
/// capitalized alphabetic words separated only by whitespace form one span.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicNameTagger;

impl HeuristicNameTagger {
    pub fn new() -> Self {
        Self
    }

    fn is_name_like(word: &str) -> bool {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {}
            _ => return false,
        }
        let rest: String = chars.filter(|c| c.is_ascii_alphabetic()).collect();
        let all_upper = rest.chars().all(|c| c.is_ascii_uppercase());
        let all_lower = rest.chars().all(|c| c.is_ascii_lowercase());
        (all_upper || all_lower) && !STOP_WORDS.contains(&word.to_ascii_uppercase().as_str())
    }

    fn is_organization_word(word: &str) -> bool {
        ORGANIZATION_WORDS.contains(&word.to_ascii_uppercase().as_str())
    }

    fn is_issuer_word(word: &str) -> bool {
        ISSUER_WORDS.contains(&word.to_ascii_uppercase().as_str())
    }

    fn spans<'a>(text: &'a str) -> Vec<TaggedSpan<'a>> {
        let mut spans = Vec::new();
        let mut run = Run::default();
        let mut prev_end = 0usize;

        for m in WORD.find_iter(text) {
            let word = m.as_str().trim_end_matches('.');
            let only_whitespace_between = text[prev_end..m.start()].chars().all(char::is_whitespace);

            if !run.is_empty() && !only_whitespace_between {
                run.flush(text, &mut spans);
            }

            if Self::is_name_like(word) {
                let issuer = Self::is_issuer_word(word);
                // issuer words and name words never share a run
                if !run.is_empty() && run.issuer != issuer {
                    run.flush(text, &mut spans);
                }
                run.push(m.start(), m.start() + word.len(), word.len(), issuer);
                run.is_organization |= issuer || Self::is_organization_word(word);
            } else {
                run.flush(text, &mut spans);
            }
            prev_end = m.end();
        }
        run.flush(text, &mut spans);
        spans
    }
}

#[derive(Default)]
struct Run {
    start: usize,
    end: usize,
    words: usize,
    has_full_word: bool,
    issuer: bool,
    is_organization: bool,
}

impl Run {
    fn is_empty(&self) -> bool {
        self.words == 0
    }

    fn push(&mut self, start: usize, end: usize, len: usize, issuer: bool) {
        if self.is_empty() {
            self.start = start;
            self.issuer = issuer;
        }
        self.end = end;
        self.words += 1;
        self.has_full_word |= len >= 2;
    }

    fn flush<'a>(&mut self, text: &'a str, out: &mut Vec<TaggedSpan<'a>>) {
        // a lone initial is not a name
        if !self.is_empty() && self.has_full_word {
            out.push(TaggedSpan {
                tag: if self.is_organization {
                    NameTag::OrganizationName
                } else {
                    NameTag::PersonalName
                },
                text: &text[self.start..self.end],
            });
        }
        *self = Run::default();
    }
}

impl NameTagger for HeuristicNameTagger {
    fn tag<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = TaggedSpan<'a>> + 'a> {
        Box::new(Self::spans(text).into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personal(tagger: &dyn NameTagger, text: &str) -> Vec<String> {
        tagger
            .tag(text)
            .filter(|s| s.tag == NameTag::PersonalName)
            .map(|s| s.text.to_string())
            .collect()
    }

    #[test]
    fn test_mock_reports_known_names_in_order() {
        let tagger = MockNameTagger::with_names(["SMITH", "JOHN"]);
        assert_eq!(personal(&tagger, "JOHN SMITH"), vec!["JOHN", "SMITH"]);
        assert!(personal(&tagger, "JANE DOE").is_empty());
    }

    #[test]
    fn test_mock_organization_spans() {
        let tagger = MockNameTagger::with_spans(vec![
            (NameTag::OrganizationName, "ACME".to_string()),
            (NameTag::PersonalName, "JANE".to_string()),
        ]);
        let spans: Vec<_> = tagger.tag("ACME JANE").collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].tag, NameTag::OrganizationName);
        assert_eq!(personal(&tagger, "ACME JANE"), vec!["JANE"]);
    }

    #[test]
    fn test_heuristic_joins_adjacent_words() {
        let tagger = HeuristicNameTagger::new();
        assert_eq!(personal(&tagger, "/ JOHN SMITH"), vec!["JOHN SMITH"]);
        assert_eq!(personal(&tagger, "Jane Q. Public"), vec!["Jane Q. Public"]);
    }

    #[test]
    fn test_heuristic_splits_on_punctuation_and_stop_words() {
        let tagger = HeuristicNameTagger::new();
        assert_eq!(
            personal(&tagger, "JOHN SMITH / ELECTRONIC USE ONLY / JANE"),
            vec!["JOHN SMITH", "JANE"]
        );
    }

    #[test]
    fn test_heuristic_rejects_lowercase_and_mixed_words() {
        let tagger = HeuristicNameTagger::new();
        assert!(personal(&tagger, "valid thru").is_empty());
        assert!(personal(&tagger, "McDONALD").is_empty());
        assert!(personal(&tagger, "A").is_empty());
    }

    #[test]
    fn test_heuristic_separates_issuer_from_holder() {
        let tagger = HeuristicNameTagger::new();
        assert_eq!(personal(&tagger, "CHASE JOHN SMITH"), vec!["JOHN SMITH"]);
        assert_eq!(personal(&tagger, "WELLS FARGO / JOHN SMITH"), vec!["JOHN SMITH"]);

        let spans: Vec<_> = tagger.tag("CAPITAL ONE JANE DOE").collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].tag, NameTag::OrganizationName);
        assert_eq!(spans[0].text, "CAPITAL ONE");
        assert_eq!(spans[1].tag, NameTag::PersonalName);
        assert_eq!(spans[1].text, "JANE DOE");
    }

    #[test]
    fn test_heuristic_tags_organizations() {
        let tagger = HeuristicNameTagger::new();
        let spans: Vec<_> = tagger.tag("FIRST NATIONAL TRUST").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].tag, NameTag::OrganizationName);
    }
}
