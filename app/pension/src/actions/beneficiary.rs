use super::WriteRequest;
use crate::contract::PensionContract;
use crate::dashboard::{Dashboard, Prepared};
use crate::events::{Action, ActionOutcome};
use crate::state::FormField;
use crate::utils::time::Clock;
use crate::utils::units::parse_address;

impl<C: PensionContract, K: Clock> Dashboard<C, K> {
    pub async fn set_beneficiary(&mut self) -> ActionOutcome {
        let prepared = self.session.require_account().and_then(|_| {
            let beneficiary = parse_address(&self.form.beneficiary_address)?;
            Ok(Prepared {
                request: WriteRequest::SetBeneficiary { beneficiary },
                clears: Some(FormField::BeneficiaryAddress),
                success: "Beneficiary set!".to_string(),
            })
        });
        self.execute(Action::SetBeneficiary, prepared).await
    }

    /// Claims an inactive owner's position as their beneficiary. Eligibility is the contract's call.
    pub async fn claim_as_beneficiary(&mut self) -> ActionOutcome {
        let prepared = self.session.require_account().and_then(|_| {
            let owner = parse_address(&self.form.claim_owner_address)?;
            Ok(Prepared {
                request: WriteRequest::ClaimAsBeneficiary { owner },
                clears: Some(FormField::ClaimOwnerAddress),
                success: "Claimed as beneficiary!".to_string(),
            })
        });
        self.execute(Action::ClaimAsBeneficiary, prepared).await
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::Address;

    use super::*;
    use crate::actions::test_support::{connected, user};
    use crate::error::DashboardError;
    use crate::contract::mock::MockAccount;

    const HEIR: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    #[tokio::test]
    async fn set_beneficiary_round_trip() {
        let mut dash = connected(MockAccount::default()).await;
        assert_eq!(dash.snapshot().beneficiary.ready(), Some(&None));

        dash.form.set(FormField::BeneficiaryAddress, HEIR);
        assert!(dash.controls().set_beneficiary_enabled);
        assert!(dash.set_beneficiary().await.tx_hash().is_some());

        assert_eq!(dash.form.beneficiary_address, "");
        let expected: Address = HEIR.parse().unwrap();
        assert_eq!(dash.snapshot().beneficiary.ready(), Some(&Some(expected)));
    }

    #[tokio::test]
    async fn malformed_beneficiary_rejected() {
        let mut dash = connected(MockAccount::default()).await;
        dash.form.set(FormField::BeneficiaryAddress, "0x1234");
        assert_eq!(dash.set_beneficiary().await, ActionOutcome::Rejected(DashboardError::InvalidAddress));
        assert_eq!(dash.form.beneficiary_address, "0x1234");
        assert!(!dash.contract().calls().contains(&"setBeneficiary".to_string()));
    }

    #[tokio::test]
    async fn beneficiary_claim_reverts_surface() {
        let mut dash = connected(MockAccount::default()).await;
        // owner never named us
        dash.form.set(FormField::ClaimOwnerAddress, HEIR.to_lowercase());
        let out = dash.claim_as_beneficiary().await;
        assert_eq!(
            out,
            ActionOutcome::Rejected(DashboardError::ExternalCallFailed(
                "execution reverted: Not beneficiary".into()
            ))
        );
        assert_eq!(dash.form.claim_owner_address, HEIR.to_lowercase());
        assert!(!dash.pending().is_pending());
    }

    #[tokio::test]
    async fn named_beneficiary_can_claim() {
        let owner = Address::repeat_byte(0x22);
        let mut dash = connected(MockAccount::default()).await;
        dash.contract()
            .accounts
            .borrow_mut()
            .insert(owner, MockAccount { beneficiary: user(), ..Default::default() });

        dash.form.set(FormField::ClaimOwnerAddress, owner.to_string());
        assert!(dash.claim_as_beneficiary().await.tx_hash().is_some());
        assert_eq!(dash.form.claim_owner_address, "");
    }
}
