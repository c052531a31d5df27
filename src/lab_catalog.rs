//! Lab-test catalog. Test bookings must name a test listed here.

use crate::models::{LabTest, LabTestFilter};

static LAB_TESTS: [LabTest; 6] = [
    LabTest {
        id: "t1",
        name: "Complete Blood Count (CBC)",
        description: "Measures different components of blood",
        category: "Blood Test",
        price: 400,
        preparation_required: false,
        preparation_note: None,
        report_time: "24 hours",
    },
    LabTest {
        id: "t2",
        name: "Lipid Profile",
        description: "Cholesterol and triglycerides test",
        category: "Blood Test",
        price: 600,
        preparation_required: true,
        preparation_note: Some("12-14 hours fasting required"),
        report_time: "24 hours",
    },
    LabTest {
        id: "t3",
        name: "Blood Sugar (Fasting)",
        description: "Measures blood glucose levels",
        category: "Blood Test",
        price: 300,
        preparation_required: true,
        preparation_note: Some("8-12 hours fasting required"),
        report_time: "6 hours",
    },
    LabTest {
        id: "t4",
        name: "Thyroid Profile",
        description: "T3, T4, and TSH levels",
        category: "Blood Test",
        price: 800,
        preparation_required: false,
        preparation_note: None,
        report_time: "48 hours",
    },
    LabTest {
        id: "t5",
        name: "Liver Function Test (LFT)",
        description: "Checks liver health",
        category: "Blood Test",
        price: 700,
        preparation_required: false,
        preparation_note: None,
        report_time: "24 hours",
    },
    LabTest {
        id: "t6",
        name: "X-Ray Chest",
        description: "Chest radiography",
        category: "Radiology",
        price: 500,
        preparation_required: false,
        preparation_note: None,
        report_time: "4 hours",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct LabCatalog {
    tests: &'static [LabTest],
}

impl Default for LabCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LabCatalog {
    pub fn builtin() -> Self {
        Self { tests: &LAB_TESTS }
    }

    pub fn list(&self, filter: &LabTestFilter) -> Vec<LabTest> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        self.tests
            .iter()
            .filter(|t| filter.category.as_deref().map_or(true, |c| t.category == c))
            .filter(|t| {
                search
                    .as_deref()
                    .map_or(true, |s| t.name.to_lowercase().contains(s))
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&'static LabTest> {
        self.tests.iter().find(|t| t.id == id)
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for test in self.tests {
            if !seen.contains(&test.category) {
                seen.push(test.category);
            }
        }
        seen
    }
}
