//! Fixed template catalog for synthetic map tasks.

/// A task template: title, reward in dollars, and a one-line description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    /// Short task title shown on the map pin.
    pub title: &'static str,
    /// Reward in whole dollars.
    pub reward: i64,
    /// One-line task description.
    pub description: &'static str,
}

/// The full template catalog. The generator emits at most one task per entry,
/// so the catalog size bounds the number of tasks on the map.
pub const TEMPLATES: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Move Couch",
        reward: 50,
        description: "Need help moving a couch to the second floor.",
    },
    TaskTemplate {
        title: "Grocery Run",
        reward: 25,
        description: "Pick up groceries from Whole Foods.",
    },
    TaskTemplate {
        title: "Dog Walking",
        reward: 20,
        description: "Walk my golden retriever for 30 mins.",
    },
    TaskTemplate {
        title: "Assemble Furniture",
        reward: 40,
        description: "Assemble an IKEA desk.",
    },
    TaskTemplate {
        title: "Yard Work",
        reward: 35,
        description: "Rake leaves in the backyard.",
    },
    TaskTemplate {
        title: "Tech Support",
        reward: 30,
        description: "Help setting up a new printer.",
    },
    TaskTemplate {
        title: "Cat Sitting",
        reward: 45,
        description: "Feed my cat while I'm away for the weekend.",
    },
    TaskTemplate {
        title: "Car Wash",
        reward: 20,
        description: "Wash my sedan in the driveway.",
    },
    TaskTemplate {
        title: "Tutoring",
        reward: 40,
        description: "Algebra tutoring for 8th grader.",
    },
    TaskTemplate {
        title: "Lift Heavy Boxes",
        reward: 15,
        description: "Help move 5 boxes to the garage.",
    },
    TaskTemplate {
        title: "Paint Fence",
        reward: 45,
        description: "Paint the wooden fence in the front yard.",
    },
    TaskTemplate {
        title: "Snow Shoveling",
        reward: 25,
        description: "Clear the driveway and sidewalk after snowfall.",
    },
    TaskTemplate {
        title: "Bike Repair",
        reward: 30,
        description: "Fix a flat tire and tune the brakes.",
    },
    TaskTemplate {
        title: "Plant Watering",
        reward: 15,
        description: "Water my houseplants while I'm traveling.",
    },
    TaskTemplate {
        title: "Picture Hanging",
        reward: 20,
        description: "Hang six framed pictures in the living room.",
    },
    TaskTemplate {
        title: "Laundry Pickup",
        reward: 25,
        description: "Drop off and pick up dry cleaning.",
    },
    TaskTemplate {
        title: "Garage Cleanout",
        reward: 50,
        description: "Help sort and haul boxes out of the garage.",
    },
    TaskTemplate {
        title: "Babysitting",
        reward: 40,
        description: "Watch two kids for an evening.",
    },
    TaskTemplate {
        title: "Errand Run",
        reward: 20,
        description: "Return a package and pick up a prescription.",
    },
    TaskTemplate {
        title: "Window Cleaning",
        reward: 35,
        description: "Clean the outside windows on the ground floor.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(TEMPLATES.len(), 20);
    }

    #[test]
    fn test_catalog_entries_valid() {
        for template in TEMPLATES {
            assert!(!template.title.is_empty());
            assert!(!template.description.is_empty());
            assert!(template.reward > 0);
        }
    }
}
