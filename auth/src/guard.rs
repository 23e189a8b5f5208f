use crate::errors::AuthError;

/// A resource with a single owning identity.
pub trait Owned {
    type Owner: PartialEq;

    fn owner(&self) -> &Self::Owner;
}

/// Permit the operation only when the caller is the owner.
///
/// Plain equality on the identity value; there are no roles.
///
/// # Errors
/// * `OwnershipMismatch` - Caller is not the owner
pub fn authorize<T: PartialEq + ?Sized>(owner: &T, caller: &T) -> Result<(), AuthError> {
    if owner == caller {
        Ok(())
    } else {
        Err(AuthError::OwnershipMismatch)
    }
}

/// `authorize` against an [`Owned`] resource.
pub fn authorize_owner<R: Owned>(resource: &R, caller: &R::Owner) -> Result<(), AuthError> {
    authorize(resource.owner(), caller)
}
