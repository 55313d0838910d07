//! Postgres text-column support.
//!
//! IDs are stored in their string form, so the prefix survives the round trip.
//! For `bytea`/`uuid` columns use [`TypeId::to_bytes`] or
//! [`TypedId::from_bytes`] instead and keep the prefix elsewhere.

use sqlx::decode::Decode;
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::Type;

use crate::{Entity, TypeId, TypedId};

impl Type<Postgres> for TypeId {
    fn type_info() -> PgTypeInfo {
        <str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <str as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for TypeId {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <String as Encode<'_, Postgres>>::encode(self.to_string(), buf)
    }

    fn size_hint(&self) -> usize {
        self.len()
    }
}

impl<'r> Decode<'r, Postgres> for TypeId {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(TypeId::parse(s)?)
    }
}

impl<T: Entity> Type<Postgres> for TypedId<T> {
    fn type_info() -> PgTypeInfo {
        <str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <str as Type<Postgres>>::compatible(ty)
    }
}

impl<T: Entity> Encode<'_, Postgres> for TypedId<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <String as Encode<'_, Postgres>>::encode(self.to_string(), buf)
    }

    fn size_hint(&self) -> usize {
        self.len()
    }
}

impl<'r, T: Entity> Decode<'r, Postgres> for TypedId<T> {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(TypedId::parse(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account;
    impl Entity for Account {}

    #[test]
    fn test_ids_map_to_text_columns() {
        assert_eq!(
            <TypeId as Type<Postgres>>::type_info(),
            <String as Type<Postgres>>::type_info()
        );
        assert_eq!(
            <TypedId<Account> as Type<Postgres>>::type_info(),
            <String as Type<Postgres>>::type_info()
        );
    }
}
