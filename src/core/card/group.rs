use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment network / numbering scheme a card number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardGroup {
    Amex,
    Bancontact,
    /// Kept for completeness; no numbering rule maps to it.
    Bcmc,
    CarteBancaire,
    ChinaUnionPay,
    Cup,
    Codensa,
    Dankort,
    Diners,
    Discover,
    Elo,
    Hiper,
    HiperCard,
    Jcb,
    KarenMillen,
    Maestro,
    MaestroUk,
    MasterCard,
    MasterCardAlphaBankBonus,
    MasterCardBijenkorf,
    Mir,
    Oasis,
    Solo,
    Uatp,
    UnionPay,
    Visa,
    VisaAlphaBankBonus,
    VisaDankort,
    Warehouse,
    Other,
}

impl CardGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardGroup::Amex => "AMEX",
            CardGroup::Bancontact => "BANCONTACT",
            CardGroup::Bcmc => "BCMC",
            CardGroup::CarteBancaire => "CARTE_BANCAIRE",
            CardGroup::ChinaUnionPay => "CHINA_UNION_PAY",
            CardGroup::Cup => "CUP",
            CardGroup::Codensa => "CODENSA",
            CardGroup::Dankort => "DANKORT",
            CardGroup::Diners => "DINERS",
            CardGroup::Discover => "DISCOVER",
            CardGroup::Elo => "ELO",
            CardGroup::Hiper => "HIPER",
            CardGroup::HiperCard => "HIPER_CARD",
            CardGroup::Jcb => "JCB",
            CardGroup::KarenMillen => "KAREN_MILLEN",
            CardGroup::Maestro => "MAESTRO",
            CardGroup::MaestroUk => "MAESTRO_UK",
            CardGroup::MasterCard => "MASTER_CARD",
            CardGroup::MasterCardAlphaBankBonus => "MASTER_CARD_ALPHA_BANK_BONUS",
            CardGroup::MasterCardBijenkorf => "MASTER_CARD_BIJENKORF",
            CardGroup::Mir => "MIR",
            CardGroup::Oasis => "OASIS",
            CardGroup::Solo => "SOLO",
            CardGroup::Uatp => "UATP",
            CardGroup::UnionPay => "UNION_PAY",
            CardGroup::Visa => "VISA",
            CardGroup::VisaAlphaBankBonus => "VISA_ALPHA_BANK_BONUS",
            CardGroup::VisaDankort => "VISA_DANKORT",
            CardGroup::Warehouse => "WAREHOUSE",
            CardGroup::Other => "OTHER",
        }
    }

    pub fn is_bcmc(&self) -> bool {
        matches!(self, CardGroup::Bcmc | CardGroup::Bancontact)
    }
}

impl fmt::Display for CardGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
