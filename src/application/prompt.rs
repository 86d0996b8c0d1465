//! Advice prompt construction.

use crate::domain::profile::Category;
use crate::domain::{BmiResult, LifestyleProfile};

/// Instruction appended to every advice request.
pub const LANGUAGE_INSTRUCTION: &str =
    "Now give me personalized suggestions in English, Hinglish and Hindi separately.";

/// Shown with every assessment, whether or not advice was generated.
pub const DISCLAIMER: &str = "Disclaimer: This is an AI-powered tool. Please consult a certified \
     medical professional before making any medical decisions.";

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Describe the profile and its BMI for the advice backend.
#[must_use]
pub fn build_advice_prompt(profile: &LifestyleProfile, bmi: &BmiResult) -> String {
    format!(
        "The user is a {gender} aged {age} years, weighs {weight} kg with a height of {height}. \
         {bmi_message} \
         They have {smoking} smoking habit, alcohol consumption is {alcohol}, \
         vegetable intake is {veg}x/day, meals/day is {meals}, snacking between meals: {snacking}, \
         water intake is {water}L, calorie tracking: {scc}, physical activity: {faf}, \
         tech usage: {tue}, transport: {transport}, family history: {family}, \
         high calorie food: {favc}. {instruction}",
        gender = profile.gender.label(),
        age = profile.age,
        weight = profile.weight_kg,
        height = profile.height,
        bmi_message = bmi.message,
        smoking = if profile.smoking { "a" } else { "no" },
        alcohol = profile.alcohol.label(),
        veg = profile.vegetable_intake,
        meals = profile.meals_per_day,
        snacking = profile.snacking.label(),
        water = profile.water_intake,
        scc = yes_no(profile.calorie_monitoring),
        faf = profile.physical_activity,
        tue = profile.screen_time.label(),
        transport = profile.transport.label(),
        family = yes_no(profile.family_history),
        favc = yes_no(profile.fried_food),
        instruction = LANGUAGE_INSTRUCTION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::tests::sample_answers;
    use crate::domain::{bmi, Height};

    fn sample() -> (LifestyleProfile, BmiResult) {
        let profile = LifestyleProfile::try_from(&sample_answers()).expect("Should parse");
        let result = bmi(profile.weight_kg, profile.height_m()).expect("Should compute");
        (profile, result)
    }

    #[test]
    fn test_prompt_describes_profile() {
        let (profile, result) = sample();
        let prompt = build_advice_prompt(&profile, &result);

        assert!(prompt.starts_with("The user is a Male aged 25 years, weighs 70 kg"));
        assert!(prompt.contains("(originally 5ft 7in)"));
        assert!(prompt.contains(&result.message));
        assert!(prompt.contains("They have no smoking habit"));
        assert!(prompt.contains("alcohol consumption is Never"));
        assert!(prompt.contains("tech usage: Moderate Usage"));
        assert!(prompt.contains("transport: Public Transportation"));
        assert!(prompt.contains("family history: yes"));
        assert!(prompt.ends_with(LANGUAGE_INSTRUCTION));
    }

    #[test]
    fn test_disclaimer_text() {
        assert_eq!(
            DISCLAIMER,
            "Disclaimer: This is an AI-powered tool. Please consult a certified medical \
             professional before making any medical decisions."
        );
        let (profile, result) = sample();
        assert!(!build_advice_prompt(&profile, &result).contains("Disclaimer"));
    }

    #[test]
    fn test_prompt_metric_height() {
        let (mut profile, result) = sample();
        profile.height = Height::Meters(1.8);
        profile.smoking = true;
        let prompt = build_advice_prompt(&profile, &result);

        assert!(prompt.contains("height of 1.8 meters."));
        assert!(!prompt.contains("originally"));
        assert!(prompt.contains("They have a smoking habit"));
    }
}
