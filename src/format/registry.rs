//! Static name registries used for classification.
//!
//! All lookups are ASCII case-insensitive. The tables are immutable and
//! shared by every formatting call.

use std::collections::HashSet;
use std::sync::LazyLock;

/// T-SQL built-in functions (called with parentheses).
static BUILTIN_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // Aggregates
        "AVG", "CHECKSUM_AGG", "COUNT", "COUNT_BIG", "GROUPING", "GROUPING_ID", "MAX", "MIN",
        "STDEV", "STDEVP", "STRING_AGG", "SUM", "VAR", "VARP", "APPROX_COUNT_DISTINCT",
        // Ranking / analytic
        "ROW_NUMBER", "RANK", "DENSE_RANK", "NTILE", "LAG", "LEAD", "FIRST_VALUE",
        "LAST_VALUE", "CUME_DIST", "PERCENT_RANK", "PERCENTILE_CONT", "PERCENTILE_DISC",
        // String
        "ASCII", "CHAR", "CHARINDEX", "CONCAT", "CONCAT_WS", "DIFFERENCE", "FORMAT", "LEFT",
        "LEN", "LOWER", "LTRIM", "NCHAR", "PATINDEX", "QUOTENAME", "REPLACE", "REPLICATE",
        "REVERSE", "RIGHT", "RTRIM", "SOUNDEX", "SPACE", "STR", "STRING_ESCAPE",
        "STRING_SPLIT", "STUFF", "SUBSTRING", "TRANSLATE", "TRIM", "UNICODE", "UPPER",
        // Date and time
        "DATEADD", "DATEDIFF", "DATEDIFF_BIG", "DATEFROMPARTS", "DATENAME", "DATEPART",
        "DATETIME2FROMPARTS", "DATETIMEFROMPARTS", "DATETIMEOFFSETFROMPARTS", "DATE_BUCKET",
        "DATETRUNC", "DAY", "EOMONTH", "GETDATE", "GETUTCDATE", "ISDATE", "MONTH",
        "SMALLDATETIMEFROMPARTS", "SWITCHOFFSET", "SYSDATETIME", "SYSDATETIMEOFFSET",
        "SYSUTCDATETIME", "TIMEFROMPARTS", "TODATETIMEOFFSET", "YEAR",
        // Math
        "ABS", "ACOS", "ASIN", "ATAN", "ATN2", "CEILING", "COS", "COT", "DEGREES", "EXP",
        "FLOOR", "LOG", "LOG10", "PI", "POWER", "RADIANS", "RAND", "ROUND", "SIGN", "SIN",
        "SQRT", "SQUARE", "TAN",
        // Conversion and logical
        "CAST", "CONVERT", "PARSE", "TRY_CAST", "TRY_CONVERT", "TRY_PARSE", "CHOOSE", "IIF",
        "COALESCE", "NULLIF", "ISNULL", "ISNUMERIC", "GREATEST", "LEAST",
        // System and metadata
        "APP_NAME", "COL_LENGTH", "COL_NAME", "COLUMNPROPERTY", "DATABASEPROPERTYEX", "DB_ID",
        "DB_NAME", "ERROR_LINE", "ERROR_MESSAGE", "ERROR_NUMBER", "ERROR_PROCEDURE",
        "ERROR_SEVERITY", "ERROR_STATE", "FORMATMESSAGE", "HOST_NAME", "IDENT_CURRENT",
        "IDENT_INCR", "IDENT_SEED", "NEWID", "NEWSEQUENTIALID", "OBJECT_ID", "OBJECT_NAME",
        "OBJECT_SCHEMA_NAME", "OBJECTPROPERTY", "OBJECTPROPERTYEX", "SCHEMA_ID",
        "SCHEMA_NAME", "SCOPE_IDENTITY", "SERVERPROPERTY", "SUSER_NAME", "SUSER_SNAME",
        "TYPE_ID", "TYPE_NAME", "USER_ID", "USER_NAME", "XACT_STATE",
        // JSON
        "ISJSON", "JSON_VALUE", "JSON_QUERY", "JSON_MODIFY", "JSON_OBJECT", "JSON_ARRAY",
        "OPENJSON",
        // Misc
        "CHECKSUM", "BINARY_CHECKSUM", "HASHBYTES", "COMPRESS", "DECOMPRESS", "OPENROWSET",
        "OPENQUERY", "OPENXML",
    ]
    .into_iter()
    .collect()
});

/// Built-in functions that are invoked without parentheses.
static PAREN_FREE_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "CURRENT_TIMESTAMP",
        "CURRENT_USER",
        "SESSION_USER",
        "SYSTEM_USER",
        "USER",
    ]
    .into_iter()
    .collect()
});

/// T-SQL data type names.
static DATA_TYPES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "BIGINT", "INT", "SMALLINT", "TINYINT", "BIT", "DECIMAL", "NUMERIC", "MONEY",
        "SMALLMONEY", "FLOAT", "REAL", "DATE", "TIME", "DATETIME", "DATETIME2",
        "DATETIMEOFFSET", "SMALLDATETIME", "CHAR", "VARCHAR", "TEXT", "NCHAR", "NVARCHAR",
        "NTEXT", "BINARY", "VARBINARY", "IMAGE", "UNIQUEIDENTIFIER", "XML", "SQL_VARIANT",
        "ROWVERSION", "TIMESTAMP", "HIERARCHYID", "GEOMETRY", "GEOGRAPHY", "SYSNAME", "MAX",
        "INTEGER", "DEC", "DOUBLE", "PRECISION", "CHARACTER",
        "VARYING", "NATIONAL",
    ]
    .into_iter()
    .collect()
});

/// Schemas owned by SQL Server itself.
static SYSTEM_SCHEMAS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["SYS", "INFORMATION_SCHEMA"].into_iter().collect());

/// Reserved T-SQL keywords plus the clause words that read as keywords.
static KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "AUTHORIZATION", "BACKUP", "BEGIN",
        "BETWEEN", "BREAK", "BROWSE", "BULK", "BY", "CASCADE", "CASE", "CHECK", "CHECKPOINT",
        "CLOSE", "CLUSTERED", "COLLATE", "COLUMN", "COMMIT", "COMPUTE", "CONSTRAINT",
        "CONTAINS", "CONTAINSTABLE", "CONTINUE", "CREATE", "CROSS", "CURRENT", "CURSOR",
        "DATABASE", "DBCC", "DEALLOCATE", "DECLARE", "DEFAULT", "DELETE", "DENY", "DESC",
        "DISK", "DISTINCT", "DISTRIBUTED", "DROP", "DUMP", "ELSE", "END", "ERRLVL", "ESCAPE",
        "EXCEPT", "EXEC", "EXECUTE", "EXISTS", "EXIT", "EXTERNAL", "FETCH", "FILE",
        "FILLFACTOR", "FOR", "FOREIGN", "FREETEXT", "FREETEXTTABLE", "FROM", "FULL",
        "FUNCTION", "GOTO", "GRANT", "GROUP", "HAVING", "HOLDLOCK", "IDENTITY",
        "IDENTITY_INSERT", "IDENTITYCOL", "IF", "IN", "INDEX", "INNER", "INSERT", "INTERSECT",
        "INTO", "IS", "JOIN", "KEY", "KILL", "LIKE", "LINENO", "LOAD", "MERGE", "NOCHECK",
        "NONCLUSTERED", "NOT", "NULL", "OF", "OFF", "OFFSETS", "ON", "OPEN",
        "OPENDATASOURCE", "OPTION", "OR", "ORDER", "OUTER", "OVER", "PERCENT", "PIVOT",
        "PLAN", "PRIMARY", "PRINT", "PROC", "PROCEDURE", "PUBLIC", "RAISERROR", "READ",
        "READTEXT", "RECONFIGURE", "REFERENCES", "REPLICATION", "RESTORE", "RESTRICT",
        "RETURN", "REVERT", "REVOKE", "ROLLBACK", "ROWCOUNT", "ROWGUIDCOL", "RULE", "SAVE",
        "SCHEMA", "SECURITYAUDIT", "SELECT", "SEMANTICKEYPHRASETABLE",
        "SEMANTICSIMILARITYDETAILSTABLE", "SEMANTICSIMILARITYTABLE", "SET", "SETUSER",
        "SHUTDOWN", "SOME", "STATISTICS", "TABLE", "TABLESAMPLE", "TEXTSIZE", "THEN", "TO",
        "TOP", "TRAN", "TRANSACTION", "TRIGGER", "TRUNCATE", "TSEQUAL", "UNION", "UNIQUE",
        "UNPIVOT", "UPDATE", "UPDATETEXT", "USE", "VALUES", "VARYING", "VIEW", "WAITFOR",
        "WHEN", "WHERE", "WHILE", "WITH", "WITHIN", "WRITETEXT",
        // Non-reserved words that still read as keywords in formatted code
        "APPLY", "CATCH", "TRY", "GO", "OUTPUT", "MATCHED", "PARTITION", "ROWS", "RANGE",
        "UNBOUNDED", "PRECEDING", "FOLLOWING", "ROW", "NEXT", "ONLY", "OFFSET", "TIES",
        "NOCOUNT", "XACT_ABORT", "RETURNS", "INCLUDE", "LEFT", "RIGHT", "THROW", "TYPE",
        "SEQUENCE", "SYNONYM", "LOGIN", "ROLE", "NOLOCK", "READONLY", "OUT", "ASYNC",
    ]
    .into_iter()
    .collect()
});

fn lookup(table: &HashSet<&'static str>, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    table.contains(word.to_ascii_uppercase().as_str())
}

/// Whether `word` names a built-in function that takes parentheses.
pub fn is_builtin_function(word: &str) -> bool {
    lookup(&BUILTIN_FUNCTIONS, word)
}

/// Whether `word` is a built-in function that is used without parentheses
/// (`CURRENT_TIMESTAMP`, `USER`, ...).
pub fn is_paren_free_function(word: &str) -> bool {
    lookup(&PAREN_FREE_FUNCTIONS, word)
}

pub fn is_data_type(word: &str) -> bool {
    lookup(&DATA_TYPES, word)
}

pub fn is_system_schema(word: &str) -> bool {
    lookup(&SYSTEM_SCHEMAS, word)
}

pub fn is_keyword(word: &str) -> bool {
    lookup(&KEYWORDS, word)
}
