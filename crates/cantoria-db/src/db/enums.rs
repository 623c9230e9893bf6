//! Database enum types with Diesel serialization.
//!
//! Each enum backs a `TEXT` column guarded by a CHECK constraint and
//! implements `ToSql` and `FromSql` for conversion between Rust and `PostgreSQL`.
//! The database string doubles as the JSON wire value.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Returned when a string does not name a variant of one of the closed enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Liturgical section of a mass program.
///
/// Maps to `mass_song.section` and `library_song.section` CHECK constraints.
/// Variant order is the display order of a mass program.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsExpression,
    FromSqlRow,
    Serialize,
    Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum LiturgicalSection {
    Entrada,
    AtoPenitencial,
    Gloria,
    #[serde(alias = "salmo_responsorial")]
    Salmo,
    #[serde(alias = "aclamacao_evangelho")]
    Aclamacao,
    Ofertorio,
    Santo,
    #[serde(alias = "cordeiro_de_deus")]
    Cordeiro,
    Comunhao,
    Final,
}

impl LiturgicalSection {
    /// Every section, in display order.
    pub const ALL: [Self; 10] = [
        Self::Entrada,
        Self::AtoPenitencial,
        Self::Gloria,
        Self::Salmo,
        Self::Aclamacao,
        Self::Ofertorio,
        Self::Santo,
        Self::Cordeiro,
        Self::Comunhao,
        Self::Final,
    ];

    /// Returns the database string representation of this section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entrada => "entrada",
            Self::AtoPenitencial => "ato_penitencial",
            Self::Gloria => "gloria",
            Self::Salmo => "salmo",
            Self::Aclamacao => "aclamacao",
            Self::Ofertorio => "ofertorio",
            Self::Santo => "santo",
            Self::Cordeiro => "cordeiro",
            Self::Comunhao => "comunhao",
            Self::Final => "final",
        }
    }

    /// Human-readable name shown in program views and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entrada => "Entrada",
            Self::AtoPenitencial => "Ato Penitencial",
            Self::Gloria => "Glória",
            Self::Salmo => "Salmo Responsorial",
            Self::Aclamacao => "Aclamação ao Evangelho",
            Self::Ofertorio => "Ofertório",
            Self::Santo => "Santo",
            Self::Cordeiro => "Cordeiro de Deus",
            Self::Comunhao => "Comunhão",
            Self::Final => "Final",
        }
    }
}

impl FromStr for LiturgicalSection {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entrada" => Ok(Self::Entrada),
            "ato_penitencial" => Ok(Self::AtoPenitencial),
            "gloria" => Ok(Self::Gloria),
            "salmo" | "salmo_responsorial" => Ok(Self::Salmo),
            "aclamacao" | "aclamacao_evangelho" => Ok(Self::Aclamacao),
            "ofertorio" => Ok(Self::Ofertorio),
            "santo" => Ok(Self::Santo),
            "cordeiro" | "cordeiro_de_deus" => Ok(Self::Cordeiro),
            "comunhao" => Ok(Self::Comunhao),
            "final" => Ok(Self::Final),
            other => Err(UnknownVariant {
                kind: "liturgical section",
                value: other.to_string(),
            }),
        }
    }
}

impl ToSql<Text, Pg> for LiturgicalSection {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for LiturgicalSection {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        Ok(std::str::from_utf8(bytes.as_bytes())?.parse()?)
    }
}

impl fmt::Display for LiturgicalSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a musician suggestion.
///
/// Maps to `musician_suggestion.status` CHECK constraint. Any state may be
/// set from any other.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    Serialize,
    Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    #[default]
    Pendente,
    Implementada,
    Recusada,
}

impl SuggestionStatus {
    pub const ALL: [Self; 3] = [Self::Pendente, Self::Implementada, Self::Recusada];

    /// Returns the database string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Implementada => "implementada",
            Self::Recusada => "recusada",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pendente => "Pendente",
            Self::Implementada => "Implementada",
            Self::Recusada => "Recusada",
        }
    }
}

impl FromStr for SuggestionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(Self::Pendente),
            "implementada" => Ok(Self::Implementada),
            "recusada" => Ok(Self::Recusada),
            other => Err(UnknownVariant {
                kind: "suggestion status",
                value: other.to_string(),
            }),
        }
    }
}

impl ToSql<Text, Pg> for SuggestionStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for SuggestionStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        Ok(std::str::from_utf8(bytes.as_bytes())?.parse()?)
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a musician is unavailable for a date range.
///
/// Maps to `availability_block.reason` CHECK constraint. `Outro` carries its
/// text in `availability_block.custom_reason`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum UnavailabilityReason {
    Ferias,
    Doenca,
    CompromissoPessoal,
    Outro,
}

impl UnavailabilityReason {
    /// Returns the database string representation of this reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ferias => "ferias",
            Self::Doenca => "doenca",
            Self::CompromissoPessoal => "compromisso_pessoal",
            Self::Outro => "outro",
        }
    }

    /// Fixed label, or `None` for `Outro`, whose label is the custom text.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Ferias => Some("Férias"),
            Self::Doenca => Some("Doença"),
            Self::CompromissoPessoal => Some("Compromisso Pessoal"),
            Self::Outro => None,
        }
    }
}

impl FromStr for UnavailabilityReason {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ferias" => Ok(Self::Ferias),
            "doenca" => Ok(Self::Doenca),
            "compromisso_pessoal" => Ok(Self::CompromissoPessoal),
            "outro" => Ok(Self::Outro),
            other => Err(UnknownVariant {
                kind: "unavailability reason",
                value: other.to_string(),
            }),
        }
    }
}

impl ToSql<Text, Pg> for UnavailabilityReason {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for UnavailabilityReason {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        Ok(std::str::from_utf8(bytes.as_bytes())?.parse()?)
    }
}

impl fmt::Display for UnavailabilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account role.
///
/// Maps to `auth_user.role` CHECK constraint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Musico,
}

impl UserRole {
    /// Returns the database string representation of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Musico => "musico",
        }
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "musico" => Ok(Self::Musico),
            other => Err(UnknownVariant {
                kind: "user role",
                value: other.to_string(),
            }),
        }
    }
}

impl ToSql<Text, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for UserRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        Ok(std::str::from_utf8(bytes.as_bytes())?.parse()?)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
