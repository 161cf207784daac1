//! Diesel row structs for the `usuarios` table.
//!
//! Internal to the persistence adapter; the domain only sees `User` and
//! `UserDraft`.

use diesel::prelude::*;

use crate::domain::{User, UserDraft, UserId};

use super::schema::usuarios;

/// Row read back from `usuarios`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub nome: String,
    pub idade: Option<i32>,
    pub email: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(UserId::new(row.id), row.nome, row.idade, row.email)
    }
}

/// Values written by an insert; `id` comes from the serial sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = usuarios)]
pub(crate) struct NewUserRow<'a> {
    pub nome: &'a str,
    pub idade: Option<i32>,
    pub email: Option<&'a str>,
}

impl<'a> From<&'a UserDraft> for NewUserRow<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            nome: draft.name(),
            idade: Some(draft.age()),
            email: Some(draft.email()),
        }
    }
}

/// Full replacement of the mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = usuarios)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserReplacement<'a> {
    pub nome: &'a str,
    pub idade: Option<i32>,
    pub email: Option<&'a str>,
}

impl<'a> From<&'a UserDraft> for UserReplacement<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            nome: draft.name(),
            idade: Some(draft.age()),
            email: Some(draft.email()),
        }
    }
}
