//! Packs a flat list of squads into departments and divisions

use crate::entity::Squad;
use crate::organization::unit::{Department, Division};

/// Fills divisions with up to `squads_per_division` squads and departments
/// with up to `divisions_per_department` divisions, in input order
#[derive(Debug, Clone)]
pub struct OrganizationBuilder {
    squads_per_division: usize,
    divisions_per_department: usize,
    name_prefix: String,
}

impl Default for OrganizationBuilder {
    fn default() -> Self {
        Self {
            squads_per_division: 10,
            divisions_per_department: 10,
            name_prefix: "Dept".into(),
        }
    }
}

impl OrganizationBuilder {
    pub fn new(squads_per_division: usize, divisions_per_department: usize) -> Self {
        Self {
            squads_per_division: squads_per_division.max(1),
            divisions_per_department: divisions_per_department.max(1),
            ..Self::default()
        }
    }

    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn build(&self, squads: Vec<Squad>) -> Vec<Department> {
        let mut departments = Vec::new();
        let mut divisions = Vec::new();
        let mut current = Vec::with_capacity(self.squads_per_division);

        for squad in squads {
            current.push(squad);
            if current.len() == self.squads_per_division {
                self.close_division(&mut departments, &mut divisions, std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            self.close_division(&mut departments, &mut divisions, current);
        }
        if !divisions.is_empty() {
            self.close_department(&mut departments, divisions);
        }

        tracing::debug!(departments = departments.len(), "Built organization");
        departments
    }

    fn close_division(
        &self,
        departments: &mut Vec<Department>,
        divisions: &mut Vec<Division>,
        squads: Vec<Squad>,
    ) {
        let name = format!("{}-{}-Div-{}", self.name_prefix, departments.len(), divisions.len());
        divisions.push(Division::new(name).with_squads(squads));
        if divisions.len() == self.divisions_per_department {
            self.close_department(departments, std::mem::take(divisions));
        }
    }

    fn close_department(&self, departments: &mut Vec<Department>, divisions: Vec<Division>) {
        let name = format!("{}-{}", self.name_prefix, departments.len());
        departments.push(Department::new(name).with_divisions(divisions));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn squads(count: usize) -> Vec<Squad> {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        (0..count)
            .map(|i| Squad::create_random(format!("Squad-{}", i), 2, &mut rng))
            .collect()
    }

    #[test]
    fn test_build_packs_in_order() {
        let departments = OrganizationBuilder::new(3, 2).build(squads(14));

        // 14 squads -> 5 divisions (3,3,3,3,2) -> 3 departments (2,2,1)
        assert_eq!(departments.len(), 3);
        assert_eq!(departments[0].divisions.len(), 2);
        assert_eq!(departments[2].divisions.len(), 1);
        assert_eq!(departments[2].divisions[0].squads.len(), 2);
        assert_eq!(departments[0].divisions[0].squads[0].name, "Squad-0");
        assert_eq!(departments[2].divisions[0].squads[1].name, "Squad-13");

        let total: usize = departments.iter().map(Department::size).sum();
        assert_eq!(total, 28);
    }

    #[test]
    fn test_names_follow_position() {
        let departments = OrganizationBuilder::new(1, 1).name_prefix("Eng").build(squads(2));
        assert_eq!(departments[1].name, "Eng-1");
        assert_eq!(departments[1].divisions[0].name, "Eng-1-Div-0");
    }

    #[test]
    fn test_no_squads_no_departments() {
        assert!(OrganizationBuilder::default().build(Vec::new()).is_empty());
    }
}
