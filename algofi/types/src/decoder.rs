use {
    crate::{
        Address, ApplicationState, DecodedState, FieldKind, FieldSpec, FieldValue, StateError,
        StateResult, TealValue,
    },
    data_encoding::BASE64,
    std::fmt,
    tracing::debug,
};

/// Which kind of state blob is being decoded. Only affects diagnostics; the
/// decoding rules are the same for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateScope {
    Global,
    Local,
}

impl fmt::Display for StateScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateScope::Global => f.write_str("global"),
            StateScope::Local => f.write_str("local"),
        }
    }
}

/// Decode an application's global state against a table of field specs.
pub fn decode_global(
    raw_state: &ApplicationState,
    specs: &[FieldSpec],
) -> StateResult<DecodedState> {
    decode(StateScope::Global, raw_state, specs)
}

/// Decode an account's local state against a table of field specs.
pub fn decode_local(
    raw_state: &ApplicationState,
    specs: &[FieldSpec],
) -> StateResult<DecodedState> {
    decode(StateScope::Local, raw_state, specs)
}

/// For each spec, look up its raw key; decode the value if present, otherwise
/// fall back to the default. A required field (no default) that is absent
/// fails the whole decode.
pub fn decode(
    scope: StateScope,
    raw_state: &ApplicationState,
    specs: &[FieldSpec],
) -> StateResult<DecodedState> {
    let decoded = specs
        .iter()
        .map(|spec| -> StateResult<_> { Ok((spec.name, decode_field(raw_state, spec)?)) })
        .collect::<StateResult<DecodedState>>()?;

    debug!(
        %scope,
        raw_entries = raw_state.len(),
        fields = decoded.len(),
        "Decoded application state"
    );

    Ok(decoded)
}

fn decode_field(raw_state: &ApplicationState, spec: &FieldSpec) -> StateResult<FieldValue> {
    let raw = match raw_state.get(spec.key) {
        // An empty byte slice carries no address. Treat it the same as an
        // absent key. Integer fields still reject it as a type mismatch.
        Some(TealValue::Bytes(b64))
            if spec.kind == FieldKind::Address && b64.trim().is_empty() =>
        {
            None
        },
        raw => raw,
    };

    let Some(raw) = raw else {
        return spec
            .default
            .ok_or_else(|| StateError::missing_field(spec.name, spec.key.as_bytes()));
    };

    match (spec.kind, raw) {
        (FieldKind::Integer, TealValue::Uint(value)) => Ok(FieldValue::Integer(*value)),
        (FieldKind::Address, TealValue::Bytes(b64)) => {
            let bytes = BASE64
                .decode(b64.trim().as_bytes())
                .map_err(|err| StateError::decode(spec.name, format!("invalid base64: {err}")))?;
            let address =
                Address::from_slice(&bytes).map_err(|err| StateError::decode(spec.name, err))?;

            Ok(FieldValue::Address(address))
        },
        (kind, raw) => Err(StateError::decode(
            spec.name,
            format!("expecting {kind:?} field, found TEAL {} value", raw.type_name()),
        )),
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    const REWARDS_AMOUNT: &[FieldSpec] = &[FieldSpec::integer("rewards_amount", "a")];

    const STORAGE: &[FieldSpec] = &[FieldSpec::required_address("storage_address", "usa")];

    #[test_case(
        ApplicationState::from([("a", TealValue::Uint(5))])
        => DecodedState::from_iter([("rewards_amount", FieldValue::Integer(5))]);
        "present integer passes through"
    )]
    #[test_case(
        ApplicationState::new()
        => DecodedState::from_iter([("rewards_amount", FieldValue::Integer(0))]);
        "absent integer takes default"
    )]
    #[test_case(
        ApplicationState::from([("b", TealValue::Uint(7))])
        => DecodedState::from_iter([("rewards_amount", FieldValue::Integer(0))]);
        "unrelated keys are ignored"
    )]
    fn decoding_integers(raw_state: ApplicationState) -> DecodedState {
        decode_global(&raw_state, REWARDS_AMOUNT).unwrap()
    }

    #[test]
    fn defaults_are_idempotent() {
        let raw_state = ApplicationState::new();
        let first = decode_local(&raw_state, REWARDS_AMOUNT).unwrap();
        let second = decode_local(&raw_state, REWARDS_AMOUNT).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn decoding_address() {
        let raw_state = ApplicationState::from([("usa", TealValue::bytes([0xff; 32]))]);
        let decoded = decode_local(&raw_state, STORAGE).unwrap();

        assert_eq!(
            decoded.address("storage_address").unwrap().to_string(),
            "7777777777777777777777777777777777777777777777777774MSJUVU"
        );
    }

    #[test]
    fn decoding_address_with_surrounding_whitespace() {
        let b64 = format!(" {}\n", BASE64.encode(&[0; 32]));
        let raw_state = ApplicationState::from([("usa", TealValue::Bytes(b64))]);
        let decoded = decode_local(&raw_state, STORAGE).unwrap();

        assert_eq!(decoded.address("storage_address").unwrap(), Address::mock(0));
    }

    #[test_case(ApplicationState::new(); "absent key")]
    #[test_case(
        ApplicationState::from([("usa", TealValue::Bytes(String::new()))]);
        "empty bytes"
    )]
    fn missing_required_address(raw_state: ApplicationState) {
        let err = decode_local(&raw_state, STORAGE).unwrap_err();
        assert_eq!(err, StateError::MissingField {
            field: "storage_address",
            key: "usa".to_string(),
        });
    }

    #[test_case(
        ApplicationState::from([("usa", TealValue::Bytes("%%%".to_string()))]);
        "malformed base64"
    )]
    #[test_case(
        ApplicationState::from([("usa", TealValue::bytes([1; 31]))]);
        "wrong length"
    )]
    #[test_case(
        ApplicationState::from([("usa", TealValue::Uint(1))]);
        "uint where bytes expected"
    )]
    fn malformed_address(raw_state: ApplicationState) {
        let err = decode_local(&raw_state, STORAGE).unwrap_err();
        assert!(matches!(err, StateError::Decode {
            field: "storage_address",
            ..
        }));
    }

    #[test_case(TealValue::bytes(b"five"); "non-empty bytes")]
    #[test_case(TealValue::Bytes(String::new()); "empty bytes")]
    #[test_case(TealValue::Bytes("  ".to_string()); "whitespace-only bytes")]
    fn bytes_where_integer_expected(raw: TealValue) {
        let raw_state = ApplicationState::from([("a", raw)]);
        let err = decode_global(&raw_state, REWARDS_AMOUNT).unwrap_err();
        assert!(matches!(err, StateError::Decode {
            field: "rewards_amount",
            ..
        }));
    }

    #[test]
    fn one_bad_field_fails_everything() {
        let specs = [
            FieldSpec::integer("rewards_amount", "a"),
            FieldSpec::required_address("storage_address", "usa"),
        ];
        let raw_state = ApplicationState::from([("a", TealValue::Uint(5))]);

        assert!(decode_global(&raw_state, &specs).unwrap_err().is_missing_field());
    }

    #[test]
    fn explicit_default_address() {
        let specs = [FieldSpec {
            name: "admin",
            key: "adm",
            kind: FieldKind::Address,
            default: None,
        }
        .with_default(FieldValue::Address(Address::mock(9)))];

        let decoded = decode_global(&ApplicationState::new(), &specs).unwrap();
        assert_eq!(decoded.get("admin"), Some(&FieldValue::Address(Address::mock(9))));
    }
}
