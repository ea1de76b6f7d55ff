//! Shared fixtures.

use ddl_loader_core::{Dataset, Value};

/// `CREATE TABLE` script as exported by SQL Server tooling.
pub const SURVEY_EVENT_DDL: &str = "CREATE TABLE [dbo].[SurveyEvent](
\t[SurveyRecID] [int] IDENTITY(1,1) NOT FOR REPLICATION NOT NULL,
\t[SiteRecID] [int] NOT NULL,
\t[PIID] [char](3) NOT NULL,
\t[EditDate] [datetime] NOT NULL,
\t[UnitID] [int] NULL,
\t[ProjectCode] [varchar](10) NOT NULL,
\t[SDate] [datetime] NOT NULL,
\t[ObsName1] [varchar](30) NOT NULL,
\t[SurveyNotes] [varchar](2000) NULL,
 CONSTRAINT [PK_SurveyEvent] PRIMARY KEY CLUSTERED
(
\t[SurveyRecID] ASC
)WITH (PAD_INDEX = OFF, STATISTICS_NORECOMPUTE = OFF) ON [PRIMARY]
) ON [PRIMARY]
";

/// Three-column table used by the end-to-end scenario.
pub const SMALL_DDL: &str = "CREATE TABLE dbo.SurveyEvent (
    [SurveyRecID] [int],
    [SiteRecID] [int] NOT NULL,
    [SDate] [datetime] NOT NULL
)";

/// Builds a dataset from string column names.
pub fn dataset(columns: &[&str], rows: Vec<Vec<Value>>) -> Dataset {
    Dataset::new(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
}

/// Reference rows whose `SurveyRecID` maximum is `max`.
pub fn reference_up_to(max: i64) -> Dataset {
    dataset(
        &["SurveyRecID", "SiteRecID", "SDate"],
        (max - 2..=max)
            .map(|k| vec![Value::Integer(k), Value::Integer(1), Value::Null])
            .collect(),
    )
}
