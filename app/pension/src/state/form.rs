/// Pending user input. Fields are cleared only after their write succeeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub deposit_amount: String,
    pub withdraw_amount: String,
    pub beneficiary_address: String,
    pub claim_owner_address: String,
}

/// Names a `FormState` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    DepositAmount,
    WithdrawAmount,
    BeneficiaryAddress,
    ClaimOwnerAddress,
}

impl FormState {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::DepositAmount => &self.deposit_amount,
            FormField::WithdrawAmount => &self.withdraw_amount,
            FormField::BeneficiaryAddress => &self.beneficiary_address,
            FormField::ClaimOwnerAddress => &self.claim_owner_address,
        }
    }

    pub fn clear(&mut self, field: FormField) {
        self.slot(field).clear();
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::DepositAmount => &mut self.deposit_amount,
            FormField::WithdrawAmount => &mut self.withdraw_amount,
            FormField::BeneficiaryAddress => &mut self.beneficiary_address,
            FormField::ClaimOwnerAddress => &mut self.claim_owner_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_touches_one_field() {
        let mut form = FormState::default();
        form.set(FormField::DepositAmount, "100");
        form.set(FormField::WithdrawAmount, "5");
        form.clear(FormField::DepositAmount);
        assert_eq!(form.get(FormField::DepositAmount), "");
        assert_eq!(form.get(FormField::WithdrawAmount), "5");
    }
}
