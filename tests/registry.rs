#[cfg(test)]
mod tests {
    use pgcast::{
        CastContext, DATETIME, Error, INTEGER, NUMBER, Parser, Result, STRING, Scope,
        TypeDescriptor, TypecastError, Typecasts, UNICODE, Value, builtins::oid,
        default_registry, new_array_type, new_type, register_type, typecast, typecasts,
    };
    use pgcast_tests::init_logs;
    use std::sync::Arc;

    fn upper() -> Arc<TypeDescriptor> {
        new_type([oid::TEXT], "UPPER", |value, _| {
            Ok(value.map_or(Value::Null, |v| Value::Varchar(v.to_uppercase())))
        })
        .unwrap()
    }

    fn cast(casts: &Typecasts, scope: Scope, oid: u32, raw: &str) -> Result<Value> {
        casts.typecast(
            scope,
            oid,
            Some(raw.as_bytes()),
            Some(raw.len()),
            &CastContext::default(),
        )
    }

    fn is_invalid_scope(error: &Error) -> bool {
        matches!(
            error.downcast_ref::<TypecastError>(),
            Some(TypecastError::InvalidScope(..))
        )
    }

    #[test]
    fn null_everywhere() {
        init_logs();
        let context = CastContext::default();
        assert!(!default_registry().is_empty());
        for (oid, descriptor) in default_registry().iter() {
            assert!(descriptor.matches(oid));
            assert_eq!(
                descriptor.cast(None, None, &context).unwrap(),
                Value::Null,
                "type {oid} ({})",
                descriptor.name()
            );
        }
        let casts = Typecasts::new();
        for oid in [0, 16, 705, 1186, 424_242] {
            assert_eq!(
                casts
                    .typecast(Scope::Global, oid, None, None, &context)
                    .unwrap(),
                Value::Null
            );
        }
    }

    #[test]
    fn default_table() {
        init_logs();
        let registry = default_registry();
        let name = |oid| registry.get(oid).map(|v| v.name().to_owned());
        assert_eq!(name(oid::BOOL).as_deref(), Some("BOOLEAN"));
        assert_eq!(name(oid::BYTEA).as_deref(), Some("BINARY"));
        assert_eq!(name(oid::INT2).as_deref(), Some("INTEGER"));
        assert_eq!(name(oid::INT4).as_deref(), Some("INTEGER"));
        assert_eq!(name(oid::INT8).as_deref(), Some("LONGINTEGER"));
        assert_eq!(name(33).as_deref(), Some("NUMBER"));
        assert_eq!(name(oid::FLOAT8).as_deref(), Some("FLOAT"));
        assert_eq!(name(oid::NUMERIC).as_deref(), Some("DECIMAL"));
        assert_eq!(name(oid::OID).as_deref(), Some("ROWID"));
        assert_eq!(name(oid::TEXT).as_deref(), Some("STRING"));
        assert_eq!(name(oid::VARCHAR).as_deref(), Some("STRING"));
        assert_eq!(name(oid::DATE).as_deref(), Some("DATE"));
        assert_eq!(name(oid::TIME).as_deref(), Some("TIME"));
        assert_eq!(name(oid::TIMETZ).as_deref(), Some("TIME"));
        assert_eq!(name(oid::TIMESTAMP).as_deref(), Some("DATETIME"));
        assert_eq!(name(oid::TIMESTAMPTZ).as_deref(), Some("DATETIME"));
        assert_eq!(name(oid::TINTERVAL).as_deref(), Some("INTERVAL"));
        assert_eq!(name(oid::INTERVAL).as_deref(), Some("INTERVAL"));
        assert_eq!(name(oid::UNKNOWN).as_deref(), Some("UNKNOWN"));
        assert_eq!(name(oid::INT4_ARRAY).as_deref(), Some("INTEGERARRAY"));
        assert_eq!(name(oid::TEXT_ARRAY).as_deref(), Some("STRINGARRAY"));
        assert_eq!(name(oid::TIMESTAMPTZ_ARRAY).as_deref(), Some("DATETIMEARRAY"));
        assert_eq!(name(424_242), None);
    }

    #[test]
    fn descriptor_equality() {
        init_logs();
        assert_eq!(
            DATETIME.oids(),
            [oid::TIMESTAMP, oid::TIMESTAMPTZ, oid::TINTERVAL, oid::INTERVAL]
        );
        assert!(**DATETIME == oid::INTERVAL);
        assert!(**DATETIME == oid::TIMESTAMP);
        assert!(**DATETIME == oid::TIMESTAMPTZ);
        assert!(oid::INT8 == **NUMBER);
        assert!(**NUMBER == oid::NUMERIC);
        assert!(**STRING != oid::INT4);
        assert!(oid::TEXT != **INTEGER);
    }

    #[test]
    fn descriptor_construction() {
        init_logs();
        assert!(TypeDescriptor::new("EMPTY", [], Parser::String).is_err());
        assert!(new_type([], "EMPTY", |_, _| Ok(Value::Null)).is_err());
        let descriptor = TypeDescriptor::new("TEXTS", [25, 1043], Parser::String).unwrap();
        assert_eq!(descriptor.name(), "TEXTS");
        assert_eq!(descriptor.oids(), [25, 1043]);
        assert_eq!(
            typecast(&descriptor, Some(b"x"), Some(1), &CastContext::default()).unwrap(),
            Value::Varchar("x".into())
        );
    }

    #[test]
    fn unknown_fallback() {
        init_logs();
        let casts = Typecasts::new();
        assert_eq!(casts.resolve(Scope::Global, 424_242).unwrap().name(), "UNKNOWN");
        assert_eq!(
            cast(&casts, Scope::Global, 424_242, "(1,\"a\")").unwrap(),
            Value::Unknown("(1,\"a\")".into())
        );
        assert_eq!(
            cast(&casts, Scope::Global, 424_242, "{}").unwrap(),
            Value::List(vec![])
        );
    }

    #[test]
    fn cursor_overrides() {
        init_logs();
        let mut casts = Typecasts::new();
        let connection = casts.connect();
        let first = casts.open_cursor(connection).unwrap();
        let second = casts.open_cursor(connection).unwrap();
        casts.register(upper(), Scope::Cursor(first)).unwrap();

        let upper = Value::Varchar("ABC".into());
        let lower = Value::Varchar("abc".into());
        assert_eq!(cast(&casts, Scope::Cursor(first), oid::TEXT, "abc").unwrap(), upper);
        assert_eq!(cast(&casts, Scope::Cursor(second), oid::TEXT, "abc").unwrap(), lower);
        assert_eq!(
            cast(&casts, Scope::Connection(connection), oid::TEXT, "abc").unwrap(),
            lower
        );
        assert_eq!(cast(&casts, Scope::Global, oid::TEXT, "abc").unwrap(), lower);
        // Other identifiers still resolve through the chain
        assert_eq!(
            cast(&casts, Scope::Cursor(first), oid::INT4, "7").unwrap(),
            Value::Int64(7)
        );
        assert_eq!(
            cast(&casts, Scope::Cursor(first), oid::VARCHAR, "abc").unwrap(),
            lower
        );
    }

    #[test]
    fn connection_overrides() {
        init_logs();
        let mut casts = Typecasts::new();
        let first = casts.connect();
        let second = casts.connect();
        let cursor = casts.open_cursor(first).unwrap();
        let other = casts.open_cursor(second).unwrap();
        casts.register(upper(), Scope::Connection(first)).unwrap();

        let upper = Value::Varchar("ABC".into());
        let lower = Value::Varchar("abc".into());
        assert_eq!(cast(&casts, Scope::Connection(first), oid::TEXT, "abc").unwrap(), upper);
        assert_eq!(cast(&casts, Scope::Cursor(cursor), oid::TEXT, "abc").unwrap(), upper);
        assert_eq!(cast(&casts, Scope::Connection(second), oid::TEXT, "abc").unwrap(), lower);
        assert_eq!(cast(&casts, Scope::Cursor(other), oid::TEXT, "abc").unwrap(), lower);
        assert_eq!(cast(&casts, Scope::Global, oid::TEXT, "abc").unwrap(), lower);

        // The cursor wins over its connection
        let reversed = new_type([oid::TEXT], "REVERSED", |value, _| {
            Ok(value.map_or(Value::Null, |v| Value::Varchar(v.chars().rev().collect())))
        })
        .unwrap();
        casts.register(reversed, Scope::Cursor(cursor)).unwrap();
        assert_eq!(
            cast(&casts, Scope::Cursor(cursor), oid::TEXT, "abc").unwrap(),
            Value::Varchar("cba".into())
        );
        assert_eq!(cast(&casts, Scope::Connection(first), oid::TEXT, "abc").unwrap(), upper);
    }

    #[test]
    fn global_overrides() {
        init_logs();
        let mut casts = Typecasts::new();
        let connection = casts.connect();
        let cursor = casts.open_cursor(connection).unwrap();
        casts.register(upper(), Scope::Global).unwrap();
        let upper = Value::Varchar("ABC".into());
        assert_eq!(cast(&casts, Scope::Global, oid::TEXT, "abc").unwrap(), upper);
        assert_eq!(cast(&casts, Scope::Cursor(cursor), oid::TEXT, "abc").unwrap(), upper);
        // The defaults are untouched
        assert_eq!(default_registry().get(oid::TEXT).unwrap().name(), "STRING");
        assert_eq!(
            Typecasts::new()
                .resolve(Scope::Global, oid::TEXT)
                .unwrap()
                .name(),
            "STRING"
        );
    }

    #[test]
    fn closed_scopes() {
        init_logs();
        let mut casts = Typecasts::new();
        let connection = casts.connect();
        let first = casts.open_cursor(connection).unwrap();
        let second = casts.open_cursor(connection).unwrap();

        casts.close_cursor(first).unwrap();
        assert!(is_invalid_scope(
            &casts.register(upper(), Scope::Cursor(first)).unwrap_err()
        ));
        assert!(is_invalid_scope(
            &cast(&casts, Scope::Cursor(first), oid::TEXT, "abc").unwrap_err()
        ));
        assert!(is_invalid_scope(&casts.close_cursor(first).unwrap_err()));
        assert!(casts.register(upper(), Scope::Cursor(second)).is_ok());

        casts.close_connection(connection).unwrap();
        assert!(is_invalid_scope(
            &casts.register(upper(), Scope::Cursor(second)).unwrap_err()
        ));
        assert!(is_invalid_scope(
            &casts
                .register(upper(), Scope::Connection(connection))
                .unwrap_err()
        ));
        assert!(is_invalid_scope(&casts.open_cursor(connection).unwrap_err()));
        assert!(is_invalid_scope(
            &casts.close_connection(connection).unwrap_err()
        ));
        assert!(casts.register(upper(), Scope::Global).is_ok());
    }

    #[test]
    fn custom_arrays() {
        init_logs();
        let mut casts = Typecasts::new();
        let upper = upper();
        let uppers = new_array_type([oid::TEXT_ARRAY], "UPPERARRAY", &upper).unwrap();
        casts.register(uppers, Scope::Global).unwrap();
        assert_eq!(
            cast(&casts, Scope::Global, oid::TEXT_ARRAY, r#"{a,"b c",NULL}"#).unwrap(),
            Value::List(vec![
                Value::Varchar("A".into()),
                Value::Varchar("B C".into()),
                Value::Null,
            ])
        );
        let integers = new_array_type([424_243], "INTS", &INTEGER).unwrap();
        assert_eq!(
            integers
                .cast(Some(b"{1,2}"), Some(5), &CastContext::default())
                .unwrap(),
            Value::List(vec![Value::Int64(1), Value::Int64(2)])
        );
    }

    #[test]
    fn unicode_strings() {
        init_logs();
        let mut casts = Typecasts::new();
        let connection = casts.connect();
        casts
            .register(Arc::clone(&UNICODE), Scope::Connection(connection))
            .unwrap();
        let latin1 = CastContext::new().with_encoding("LATIN1");
        assert_eq!(
            casts
                .typecast(
                    Scope::Connection(connection),
                    oid::TEXT,
                    Some(&[0x63, 0x61, 0x66, 0xe9]),
                    Some(4),
                    &latin1
                )
                .unwrap(),
            Value::Varchar("café".into())
        );
        assert!(
            casts
                .typecast(Scope::Global, oid::TEXT, Some(&[0xe9]), Some(1), &latin1)
                .is_err()
        );
    }

    #[test]
    fn process_wide() {
        init_logs();
        let descriptor = new_type([424_244], "ANSWER", |_, _| Ok(Value::Int64(42))).unwrap();
        register_type(descriptor, Scope::Global).unwrap();
        let casts = typecasts().read().unwrap();
        assert_eq!(casts.resolve(Scope::Global, 424_244).unwrap().name(), "ANSWER");
        assert_eq!(
            cast(&casts, Scope::Global, 424_244, "anything").unwrap(),
            Value::Int64(42)
        );
        drop(casts);
        let mut casts = typecasts().write().unwrap();
        let connection = casts.connect();
        drop(casts);
        let local = new_type([424_245], "LOCAL", |_, _| Ok(Value::Boolean(true))).unwrap();
        register_type(local, Scope::Connection(connection)).unwrap();
        let casts = typecasts().read().unwrap();
        assert_eq!(casts.resolve(Scope::Global, 424_245).unwrap().name(), "UNKNOWN");
        assert_eq!(
            casts
                .resolve(Scope::Connection(connection), 424_245)
                .unwrap()
                .name(),
            "LOCAL"
        );
    }
}
