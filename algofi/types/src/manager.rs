use {
    crate::{Address, DecodedState, FieldSpec, StateError, StateResult},
    serde::{Deserialize, Serialize},
};

/// Storage keys used by the manager contract.
pub mod keys {
    // global state
    pub const N_REWARDS_PROGRAMS: &str = "nrp";
    pub const REWARDS_AMOUNT: &str = "ra";
    pub const REWARDS_PER_SECOND: &str = "rps";
    pub const REWARDS_ASSET_ID: &str = "rai";
    pub const REWARDS_SECONDARY_RATIO: &str = "rsr";
    pub const REWARDS_SECONDARY_ASSET_ID: &str = "rsai";

    // local state
    pub const USER_STORAGE_ADDRESS: &str = "usa";
    pub const USER_GLOBAL_MAX_BORROW_IN_DOLLARS: &str = "umbid";
    pub const USER_GLOBAL_BORROWED_IN_DOLLARS: &str = "ugbid";
}

/// Asset ids at or below this value are placeholders meaning "no asset".
pub const NULL_ASSET_ID: u64 = 1;

/// Global state of the manager application.
pub const MANAGER_GLOBAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("rewards_program_number", keys::N_REWARDS_PROGRAMS),
    FieldSpec::integer("rewards_amount", keys::REWARDS_AMOUNT),
    FieldSpec::integer("rewards_per_second", keys::REWARDS_PER_SECOND),
    FieldSpec::integer("rewards_asset_id", keys::REWARDS_ASSET_ID),
    FieldSpec::integer("rewards_secondary_ratio", keys::REWARDS_SECONDARY_RATIO),
    FieldSpec::integer("rewards_secondary_asset_id", keys::REWARDS_SECONDARY_ASSET_ID),
];

/// The user's own local state in the manager, which only points to the
/// storage account holding their position.
pub const USER_STORAGE_FIELDS: &[FieldSpec] = &[FieldSpec::required_address(
    "storage_address",
    keys::USER_STORAGE_ADDRESS,
)];

/// The storage account's local state in the manager.
pub const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer(
        "user_global_max_borrow_in_dollars",
        keys::USER_GLOBAL_MAX_BORROW_IN_DOLLARS,
    ),
    FieldSpec::integer(
        "user_global_borrowed_in_dollars",
        keys::USER_GLOBAL_BORROWED_IN_DOLLARS,
    ),
];

/// Typed view of [`MANAGER_GLOBAL_FIELDS`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerState {
    pub rewards_program_number: u64,
    pub rewards_amount: u64,
    pub rewards_per_second: u64,
    pub rewards_asset_id: u64,
    pub rewards_secondary_ratio: u64,
    pub rewards_secondary_asset_id: u64,
}

impl ManagerState {
    /// The primary then the secondary rewards asset, skipping placeholders.
    pub fn rewards_asset_ids(&self) -> Vec<u64> {
        [self.rewards_asset_id, self.rewards_secondary_asset_id]
            .into_iter()
            .filter(|id| *id > NULL_ASSET_ID)
            .collect()
    }
}

impl TryFrom<&DecodedState> for ManagerState {
    type Error = StateError;

    fn try_from(decoded: &DecodedState) -> StateResult<Self> {
        Ok(Self {
            rewards_program_number: decoded.integer("rewards_program_number")?,
            rewards_amount: decoded.integer("rewards_amount")?,
            rewards_per_second: decoded.integer("rewards_per_second")?,
            rewards_asset_id: decoded.integer("rewards_asset_id")?,
            rewards_secondary_ratio: decoded.integer("rewards_secondary_ratio")?,
            rewards_secondary_asset_id: decoded.integer("rewards_secondary_asset_id")?,
        })
    }
}

/// Typed view of [`USER_STORAGE_FIELDS`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageLink {
    pub storage_address: Address,
}

impl TryFrom<&DecodedState> for StorageLink {
    type Error = StateError;

    fn try_from(decoded: &DecodedState) -> StateResult<Self> {
        Ok(Self {
            storage_address: decoded.address("storage_address")?,
        })
    }
}

/// Typed view of [`USER_FIELDS`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserState {
    pub global_max_borrow_in_dollars: u64,
    pub global_borrowed_in_dollars: u64,
}

impl TryFrom<&DecodedState> for UserState {
    type Error = StateError;

    fn try_from(decoded: &DecodedState) -> StateResult<Self> {
        Ok(Self {
            global_max_borrow_in_dollars: decoded.integer("user_global_max_borrow_in_dollars")?,
            global_borrowed_in_dollars: decoded.integer("user_global_borrowed_in_dollars")?,
        })
    }
}

/// Deployment info for a manager, as shipped in network presets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerInfo {
    pub manager_app_id: u64,
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{decode_global, decode_local, ApplicationState, TealValue},
        test_case::test_case,
    };

    #[test]
    fn full_manager_state() {
        let raw_state = ApplicationState::from([
            (keys::N_REWARDS_PROGRAMS, TealValue::Uint(3)),
            (keys::REWARDS_AMOUNT, TealValue::Uint(1_000_000)),
            (keys::REWARDS_PER_SECOND, TealValue::Uint(12)),
            (keys::REWARDS_ASSET_ID, TealValue::Uint(31566704)),
            (keys::REWARDS_SECONDARY_RATIO, TealValue::Uint(500)),
            (keys::REWARDS_SECONDARY_ASSET_ID, TealValue::Uint(0)),
        ]);

        let decoded = decode_global(&raw_state, MANAGER_GLOBAL_FIELDS).unwrap();
        let state = ManagerState::try_from(&decoded).unwrap();

        assert_eq!(state, ManagerState {
            rewards_program_number: 3,
            rewards_amount: 1_000_000,
            rewards_per_second: 12,
            rewards_asset_id: 31566704,
            rewards_secondary_ratio: 500,
            rewards_secondary_asset_id: 0,
        });
    }

    #[test]
    fn empty_manager_state_is_all_zeros() {
        let decoded = decode_global(&ApplicationState::new(), MANAGER_GLOBAL_FIELDS).unwrap();
        assert_eq!(decoded.len(), MANAGER_GLOBAL_FIELDS.len());
        assert_eq!(ManagerState::try_from(&decoded).unwrap(), ManagerState::default());
    }

    #[test_case(0, 0 => Vec::<u64>::new(); "no rewards")]
    #[test_case(1, 1 => Vec::<u64>::new(); "placeholder ids")]
    #[test_case(2, 0 => vec![2]; "primary only")]
    #[test_case(0, 7 => vec![7]; "secondary only")]
    #[test_case(5, 7 => vec![5, 7]; "both")]
    fn rewards_asset_ids(primary: u64, secondary: u64) -> Vec<u64> {
        ManagerState {
            rewards_asset_id: primary,
            rewards_secondary_asset_id: secondary,
            ..Default::default()
        }
        .rewards_asset_ids()
    }

    #[test]
    fn user_state_from_storage_account() {
        let raw_state = ApplicationState::from([(
            keys::USER_GLOBAL_BORROWED_IN_DOLLARS,
            TealValue::Uint(250),
        )]);

        let decoded = decode_local(&raw_state, USER_FIELDS).unwrap();

        assert_eq!(UserState::try_from(&decoded).unwrap(), UserState {
            global_max_borrow_in_dollars: 0,
            global_borrowed_in_dollars: 250,
        });
    }

    #[test]
    fn storage_link() {
        let raw_state = ApplicationState::from([(
            keys::USER_STORAGE_ADDRESS,
            TealValue::bytes(Address::mock(4)),
        )]);

        let decoded = decode_local(&raw_state, USER_STORAGE_FIELDS).unwrap();

        assert_eq!(StorageLink::try_from(&decoded).unwrap(), StorageLink {
            storage_address: Address::mock(4),
        });
    }

    #[test]
    fn manager_info_from_json() {
        let info: ManagerInfo =
            serde_json::from_str(r#"{ "manager_app_id": 465818260 }"#).unwrap();
        assert_eq!(info.manager_app_id, 465818260);
    }
}
