#[cfg(test)]
mod tests {
    use mica::graph::CanonicalType;
    use mica::system::{AwsGlue, Oracle, SourceSystem, SqlServer};

    fn map(system: &dyn SourceSystem, native: &str) -> CanonicalType {
        system.type_table().map(Some(native))
    }

    #[test]
    fn oracle_types() {
        assert_eq!(map(&Oracle, "NUMBER(10,2)"), CanonicalType::Number);
        assert_eq!(map(&Oracle, "BINARY_DOUBLE"), CanonicalType::Number);
        assert_eq!(map(&Oracle, "VARCHAR2(200)"), CanonicalType::String);
        assert_eq!(map(&Oracle, "NCLOB"), CanonicalType::String);
        assert_eq!(
            map(&Oracle, "TIMESTAMP(6) WITH TIME ZONE"),
            CanonicalType::Timestamp
        );
        // Oracle DATE carries time of day.
        assert_eq!(map(&Oracle, "DATE"), CanonicalType::Datetime);
        assert_eq!(map(&Oracle, "BLOB"), CanonicalType::Bytes);
        assert_eq!(map(&Oracle, "LONG RAW"), CanonicalType::Bytes);
        assert_eq!(map(&Oracle, "SDO_GEOMETRY"), CanonicalType::Other);
    }

    #[test]
    fn oracle_matching_is_case_insensitive() {
        assert_eq!(map(&Oracle, "number"), CanonicalType::Number);
        assert_eq!(map(&Oracle, "Varchar2(64)"), CanonicalType::String);
    }

    #[test]
    fn sqlserver_types() {
        assert_eq!(map(&SqlServer, "bigint"), CanonicalType::Number);
        assert_eq!(map(&SqlServer, "decimal(18,4)"), CanonicalType::Number);
        assert_eq!(map(&SqlServer, "nvarchar(50)"), CanonicalType::String);
        assert_eq!(map(&SqlServer, "uniqueidentifier"), CanonicalType::String);
        assert_eq!(map(&SqlServer, "bit"), CanonicalType::Boolean);
        assert_eq!(map(&SqlServer, "date"), CanonicalType::Date);
        assert_eq!(map(&SqlServer, "datetime2"), CanonicalType::Datetime);
        assert_eq!(map(&SqlServer, "datetimeoffset"), CanonicalType::Timestamp);
        assert_eq!(map(&SqlServer, "varbinary(max)"), CanonicalType::Bytes);
        assert_eq!(map(&SqlServer, "geography"), CanonicalType::Other);
    }

    #[test]
    fn glue_types() {
        assert_eq!(map(&AwsGlue, "bigint"), CanonicalType::Number);
        assert_eq!(map(&AwsGlue, "decimal(10,0)"), CanonicalType::Number);
        assert_eq!(map(&AwsGlue, "string"), CanonicalType::String);
        assert_eq!(map(&AwsGlue, "varchar(20)"), CanonicalType::String);
        assert_eq!(map(&AwsGlue, "boolean"), CanonicalType::Boolean);
        assert_eq!(map(&AwsGlue, "date"), CanonicalType::Date);
        assert_eq!(map(&AwsGlue, "timestamp"), CanonicalType::Timestamp);
        assert_eq!(map(&AwsGlue, "binary"), CanonicalType::Bytes);
        assert_eq!(map(&AwsGlue, "struct<a:int,b:string>"), CanonicalType::Other);
    }

    #[test]
    fn missing_native_type_is_other() {
        assert_eq!(Oracle.type_table().map(None), CanonicalType::Other);
        assert_eq!(Oracle.type_table().map(Some("")), CanonicalType::Other);
    }

    #[test]
    fn canonical_wire_form_is_uppercase() {
        assert_eq!(CanonicalType::Number.as_str(), "NUMBER");
        assert_eq!(CanonicalType::Datetime.as_str(), "DATETIME");
        assert_eq!(CanonicalType::Other.as_str(), "OTHER");
    }
}
