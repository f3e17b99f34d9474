use once_cell::sync::Lazy;
use regex::Regex;

use super::digits::DigitString;
use super::group::CardGroup;

/// A brand paired with the (left-anchored, growing-prefix) shape of its numbers.
#[derive(Debug, Clone)]
pub struct CardTypeRule {
    pub group: CardGroup,
    pattern: Regex,
}

impl CardTypeRule {
    fn new(group: CardGroup, pattern: &str) -> Self {
        Self {
            group,
            pattern: Regex::new(pattern).expect("card type rule pattern must compile"),
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_match(&self, digits: &DigitString) -> bool {
        self.pattern.is_match(digits.as_str())
    }
}

const ELO_PATTERN: &str = concat!(
    "^(",
    "(506699|5067[0-6][0-9]|50677[0-8])[0-9]{0,12}|",
    "(509[0-8][0-9]{2}|5099[0-8][0-9]|50999[0-9])[0-9]{0,12}|",
    "(65003[1-3])[0-9]{0,12}|",
    "(65003[5-9]|65004[0-9]|65005[01])[0-9]{0,12}|",
    "(65040[5-9]|6504[1-3][0-9])[0-9]{0,12}|",
    "(65048[5-9]|65049[0-9]|6505[0-2][0-9]|65053[0-8])[0-9]{0,12}|",
    "(65054[1-9]|6505[5-8][0-9]|65059[0-8])[0-9]{0,12}|",
    "(65070[0-9]|65071[0-8])[0-9]{0,12}|",
    "(65072[0-7])[0-9]{0,12}|",
    "(65090[1-9]|6509[1-6][0-9]|65097[0-8])[0-9]{0,12}|",
    "(65165[2-9]|6516[67][0-9])[0-9]{0,12}|",
    "(65500[0-9]|65501[0-9])[0-9]{0,12}|",
    "(65502[1-9]|6550[34][0-9]|65505[0-8])[0-9]{0,12}|",
    "(401178|401179|438935|457631|457632|431274|451416|457393|504175|627780|636297|636368)[0-9]{0,12}",
    ")$"
);

/// Evaluation order matters: several patterns are numeric supersets of
/// others, so narrow co-brands sit before their parent network and the
/// generic Maestro / Carte Bancaire ranges come last.
pub static CARD_TYPE_RULES: Lazy<Vec<CardTypeRule>> = Lazy::new(|| {
    vec![
        CardTypeRule::new(CardGroup::Amex, "^3[47][0-9]{0,13}$"),
        CardTypeRule::new(CardGroup::VisaAlphaBankBonus, "^(450903)[0-9]{0,10}$"),
        CardTypeRule::new(CardGroup::VisaDankort, "^(4571)[0-9]{0,12}$"),
        CardTypeRule::new(CardGroup::Visa, "^4[0-9]{0,16}$"),
        CardTypeRule::new(CardGroup::Elo, ELO_PATTERN),
        CardTypeRule::new(CardGroup::MasterCardBijenkorf, "^(5100081)[0-9]{0,9}$"),
        CardTypeRule::new(CardGroup::MasterCardAlphaBankBonus, "^(510099)[0-9]{0,10}$"),
        CardTypeRule::new(
            CardGroup::MasterCard,
            "^(5[1-5][0-9]{5,}|(222[1-9]|22[3-9][0-9]|2[3-6][0-9]{2}|27[01][0-9]|2720)[0-9]{0,12})$",
        ),
        CardTypeRule::new(
            CardGroup::Diners,
            "^((30)[0123459][0-9]{0,11}|(3)[689][0-9]{0,12})$",
        ),
        CardTypeRule::new(
            CardGroup::Discover,
            "^((6011)[0-9]{0,12}|(64)[4-9][0-9]{0,13}|(65)[0-9]{0,14})$",
        ),
        CardTypeRule::new(
            CardGroup::Jcb,
            "^((352[89]|35[3-8][0-9])[0-9]{0,12}|(2131)[0-9]{0,19}|(1800)[0-9]{0,19})$",
        ),
        CardTypeRule::new(CardGroup::UnionPay, "^(62|81)[0-9]{0,}$"),
        CardTypeRule::new(CardGroup::HiperCard, "^(606282)[0-9]{0,10}$"),
        CardTypeRule::new(
            CardGroup::Bancontact,
            "^((6703)[0-9]{0,15}|(479658|606005)[0-9]{0,13})$",
        ),
        CardTypeRule::new(CardGroup::Solo, "^(6767)[0-9]{0,15}$"),
        CardTypeRule::new(CardGroup::Dankort, "^(5019)[0-9]{0,12}$"),
        CardTypeRule::new(CardGroup::Uatp, "^1[0-9]{0,14}$"),
        CardTypeRule::new(CardGroup::ChinaUnionPay, "^(62)[0-9]{0,17}$"),
        CardTypeRule::new(CardGroup::Codensa, "^(590712)[0-9]{0,10}$"),
        CardTypeRule::new(
            CardGroup::Hiper,
            "^(637095|637568|637599|637609|637612)[0-9]{0,10}$",
        ),
        CardTypeRule::new(CardGroup::Oasis, "^(982616)[0-9]{0,10}$"),
        CardTypeRule::new(CardGroup::KarenMillen, "^(98261465)[0-9]{0,8}$"),
        CardTypeRule::new(CardGroup::Warehouse, "^(982633)[0-9]{0,10}$"),
        CardTypeRule::new(CardGroup::Mir, "^(220)[0-9]{0,16}$"),
        CardTypeRule::new(CardGroup::MaestroUk, "^(6759)[0-9]{0,15}$"),
        CardTypeRule::new(CardGroup::Maestro, "^(5[6-8][0-9]{0,17}|6[0-9]{0,18})$"),
        CardTypeRule::new(CardGroup::CarteBancaire, "^[4-6][0-9]{3,15}$"),
    ]
});

/// First-match brand classifier over [`CARD_TYPE_RULES`].
#[derive(Debug, Clone, Copy)]
pub struct CardTypeClassifier {
    rules: &'static [CardTypeRule],
}

impl CardTypeClassifier {
    pub fn new() -> Self {
        Self {
            rules: CARD_TYPE_RULES.as_slice(),
        }
    }

    pub fn rules(&self) -> &[CardTypeRule] {
        self.rules
    }

    pub fn classify(&self, digits: &DigitString) -> Option<CardGroup> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(digits))
            .map(|rule| rule.group)
    }

    /// Classifies a number that may still be in progress (typed, or partially
    /// read). No checksum is applied.
    pub fn classify_partial(&self, text: &str) -> Option<CardGroup> {
        let digits = DigitString::from_text(text);
        if digits.is_empty() {
            return None;
        }
        self.classify(&digits)
    }

    /// True when `digits` classifies as exactly `group`.
    pub fn matches(&self, digits: &DigitString, group: CardGroup) -> bool {
        self.classify(digits) == Some(group)
    }
}

impl Default for CardTypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
