//! 卡号规则：数字归一化、卡组织匹配、Luhn 校验

pub mod digits;
pub mod group;
pub mod luhn;
pub mod rules;

pub use digits::DigitString;
pub use group::CardGroup;
pub use luhn::MIN_CARD_NUMBER_LENGTH;
pub use rules::{CardTypeClassifier, CardTypeRule, CARD_TYPE_RULES};
