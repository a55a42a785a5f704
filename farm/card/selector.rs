use farm_card_trait::AccountId;

/// Which action widget the card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    ConnectPrompt,
    EnableAction,
    StakeHarvestWidget,
}

pub fn select(account: Option<&AccountId>, is_approved: bool) -> ViewKind {
    match (account, is_approved) {
        (None, _) => ViewKind::ConnectPrompt,
        (Some(_), false) => ViewKind::EnableAction,
        (Some(_), true) => ViewKind::StakeHarvestWidget,
    }
}
