pub mod habit;
pub mod tag;

pub use habit::{
    Frequency, FrequencyType, Habit, HabitDto, HabitDtoV2, HabitStatus, HabitType,
    HabitWithTagsDto, HabitWithTagsDtoV2, Milestone, Target,
};
pub use tag::{Tag, TagDto};
