// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;

use crate::errors::InputError;
use crate::models::{CategoryEntry, CategoryKey, CategoryKind, Transaction};

use CategoryKind::{Expense, Income};

const BUILTIN: &[(&str, &str, CategoryKind)] = &[
    ("salary", "Income: Salary", Income),
    ("investments", "Income: Investments", Income),
    ("housing_rent", "Housing: Mortgage or Rent", Expense),
    ("housing_tax", "Housing: Property Taxes", Expense),
    ("housing_repairs", "Housing: Household Repairs", Expense),
    ("housing_hoa", "Housing: HOA Fees", Expense),
    ("transport_payment", "Transportation: Car Payment", Expense),
    ("transport_warranty", "Transportation: Car Warranty", Expense),
    ("transport_gas", "Transportation: Gas", Expense),
    ("transport_tires", "Transportation: Tires", Expense),
    ("transport_maintenance", "Transportation: Maintenance", Expense),
    ("transport_parking", "Transportation: Parking Fees", Expense),
    ("transport_repairs", "Transportation: Repairs", Expense),
    ("transport_registration", "Transportation: Registration/DMV", Expense),
    ("food_groceries", "Food: Groceries", Expense),
    ("food_restaurants", "Food: Restaurants", Expense),
    ("food_pet", "Food: Pet Food", Expense),
    ("utils_electricity", "Utilities: Electricity", Expense),
    ("utils_water", "Utilities: Water", Expense),
    ("utils_garbage", "Utilities: Garbage", Expense),
    ("utils_phones", "Utilities: Phones", Expense),
    ("utils_cable", "Utilities: Cable", Expense),
    ("utils_internet", "Utilities: Internet", Expense),
    ("clothing_adult", "Clothing: Adults", Expense),
    ("clothing_adult_shoes", "Clothing: Adults' Shoes", Expense),
    ("clothing_child", "Clothing: Children", Expense),
    ("clothing_child_shoes", "Clothing: Children's Shoes", Expense),
    ("medical_primary", "Medical: Primary Care", Expense),
    ("medical_dental", "Medical: Dental Care", Expense),
    ("medical_specialty", "Medical: Specialty Care", Expense),
    ("medical_urgent", "Medical: Urgent Care", Expense),
    ("medical_meds", "Medical: Medications", Expense),
    ("medical_devices", "Medical: Medical Devices", Expense),
    ("ins_health", "Insurance: Health", Expense),
    ("ins_home", "Insurance: Homeowner/Renter", Expense),
    ("ins_auto", "Insurance: Auto", Expense),
    ("ins_life", "Insurance: Life", Expense),
    ("ins_disability", "Insurance: Disability", Expense),
    ("household_toiletries", "Household: Toiletries", Expense),
    ("household_laundry", "Household: Laundry Supplies", Expense),
    ("household_cleaning", "Household: Cleaning Supplies", Expense),
    ("household_tools", "Household: Tools", Expense),
    ("personal_gym", "Personal: Gym Memberships", Expense),
    ("personal_hair", "Personal: Haircuts/Salon", Expense),
    ("personal_cosmetics", "Personal: Cosmetics", Expense),
    ("personal_babysitter", "Personal: Babysitter", Expense),
    ("personal_subs", "Personal: Subscriptions", Expense),
    ("debt_personal", "Debt: Personal Loans", Expense),
    ("debt_student", "Debt: Student Loans", Expense),
    ("debt_credit", "Debt: Credit Cards", Expense),
    ("retire_plan", "Retirement: Financial Planning", Expense),
    ("retire_invest", "Retirement: Investing", Expense),
    ("edu_college", "Education: College", Expense),
    ("edu_supplies", "Education: School Supplies", Expense),
    ("edu_books", "Education: Books", Expense),
    ("save_emergency", "Savings: Emergency Fund", Expense),
    ("save_big", "Savings: Big Purchases", Expense),
    ("save_other", "Savings: Other", Expense),
    ("gift_bday", "Gifts: Birthday/Anniversary", Expense),
    ("gift_special", "Gifts: Special Occasion", Expense),
    ("gift_charity", "Gifts: Charities", Expense),
    ("ent_alcohol", "Entertainment: Alcohol/Bars", Expense),
    ("ent_games", "Entertainment: Games", Expense),
    ("ent_movies", "Entertainment: Movies/Concerts", Expense),
    ("ent_vacations", "Entertainment: Vacations", Expense),
    ("ent_subs", "Entertainment: Subscriptions", Expense),
    ("other", "Other", Expense),
];

static DEFAULT_ENTRIES: Lazy<Vec<CategoryEntry>> = Lazy::new(|| {
    BUILTIN
        .iter()
        .map(|(key, label, kind)| CategoryEntry {
            key: CategoryKey::new(*key),
            label: (*label).to_string(),
            kind: *kind,
        })
        .collect()
});

/// Category lookup table: the built-in entries plus user-added ones.
/// User entries shadow built-ins with the same key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    custom: Vec<CategoryEntry>,
}

impl Catalog {
    pub fn new(custom: Vec<CategoryEntry>) -> Self {
        Self { custom }
    }

    pub fn get(&self, key: &str) -> Option<&CategoryEntry> {
        self.custom
            .iter()
            .find(|e| e.key.as_str() == key)
            .or_else(|| DEFAULT_ENTRIES.iter().find(|e| e.key.as_str() == key))
    }

    pub fn kind(&self, key: &str) -> Option<CategoryKind> {
        self.get(key).map(|e| e.kind)
    }

    /// Catalog label, or the key with its first letter upper-cased.
    pub fn display_label(&self, key: &str) -> String {
        match self.get(key) {
            Some(entry) => entry.label.clone(),
            None => capitalize(key),
        }
    }

    /// Every entry in declaration order, user additions last.
    pub fn entries(&self) -> Vec<&CategoryEntry> {
        let mut out: Vec<&CategoryEntry> = DEFAULT_ENTRIES
            .iter()
            .filter(|e| !self.custom.iter().any(|c| c.key == e.key))
            .collect();
        out.extend(self.custom.iter());
        out
    }

    pub fn custom_entries(&self) -> &[CategoryEntry] {
        &self.custom
    }

    /// Adds (or replaces) a user category. The key is the lower-cased name with
    /// whitespace turned into `_`; new categories are expenses.
    pub fn add_category(&mut self, name: &str) -> Result<CategoryEntry, InputError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::EmptyField("Category name"));
        }
        let key: String = name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        let entry = CategoryEntry {
            key: CategoryKey::new(key),
            label: name.to_string(),
            kind: CategoryKind::Expense,
        };
        match self.custom.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry.clone(),
            None => self.custom.push(entry.clone()),
        }
        Ok(entry)
    }

    /// Gives untitled transactions their category's display label.
    pub fn fill_missing_titles(&self, transactions: &mut [Transaction]) {
        for t in transactions.iter_mut().filter(|t| t.title.trim().is_empty()) {
            t.title = self.display_label(t.category.as_str());
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
