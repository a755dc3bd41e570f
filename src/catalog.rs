use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MuscleGroup {
    pub id: &'static str,
    pub name: &'static str,
    pub exercises: &'static [&'static str],
}

pub const MUSCLE_GROUPS: &[MuscleGroup] = &[
    MuscleGroup {
        id: "chest",
        name: "Chest",
        exercises: &[
            "Bench Press",
            "Incline Bench Press",
            "Decline Bench Press",
            "Dumbbell Flyes",
            "Push-ups",
            "Chest Dips",
            "Cable Crossover",
        ],
    },
    MuscleGroup {
        id: "back",
        name: "Back",
        exercises: &[
            "Pull-ups",
            "Lat Pulldown",
            "Barbell Rows",
            "Dumbbell Rows",
            "Deadlifts",
            "T-Bar Rows",
            "Cable Rows",
        ],
    },
    MuscleGroup {
        id: "shoulders",
        name: "Shoulders",
        exercises: &[
            "Overhead Press",
            "Lateral Raises",
            "Front Raises",
            "Rear Delt Flyes",
            "Arnold Press",
            "Upright Rows",
            "Shrugs",
        ],
    },
    MuscleGroup {
        id: "arms",
        name: "Arms",
        exercises: &[
            "Bicep Curls",
            "Hammer Curls",
            "Tricep Dips",
            "Close-Grip Bench Press",
            "Preacher Curls",
            "Tricep Extensions",
            "Cable Curls",
        ],
    },
    MuscleGroup {
        id: "legs",
        name: "Legs",
        exercises: &[
            "Squats",
            "Leg Press",
            "Lunges",
            "Leg Curls",
            "Leg Extensions",
            "Calf Raises",
            "Romanian Deadlifts",
        ],
    },
    MuscleGroup {
        id: "core",
        name: "Core",
        exercises: &[
            "Planks",
            "Crunches",
            "Russian Twists",
            "Mountain Climbers",
            "Leg Raises",
            "Dead Bugs",
            "Bicycle Crunches",
        ],
    },
];

pub fn muscle_group_of(exercise: &str) -> Option<&'static MuscleGroup> {
    MUSCLE_GROUPS.iter().find(|group| {
        group
            .exercises
            .iter()
            .any(|name| name.eq_ignore_ascii_case(exercise))
    })
}
