use super::model::Zone;

// ---------------------------------------------------------------------------
// Static educational snippets, keyed by zone and canonical class key
// ---------------------------------------------------------------------------

/// Short patient-facing explanation of one predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EducationEntry {
    pub what: &'static str,
    pub why: &'static str,
    pub next: &'static str,
}

pub const FALLBACK_WHAT: &str = "Information not available.";
pub const FALLBACK_WHY: &str = "—";
pub const FALLBACK_NEXT: &str = "Consult a clinician.";
pub const DISCLAIMER: &str = "Educational content only. Not a diagnosis or treatment plan.";

const BRAIN: [(&str, EducationEntry); 4] = [
    (
        "glioma",
        EducationEntry {
            what: "Gliomas are brain tumors arising from glial cells. Severity varies by grade.",
            why: "They grow from support cells in the brain; exact causes are often unclear.",
            next: "Neurosurgical review; treatment may include surgery and radiotherapy ± chemotherapy.",
        },
    ),
    (
        "meningioma",
        EducationEntry {
            what: "Meningiomas grow from the brain’s coverings and are often slow-growing/benign.",
            why: "Sometimes incidental; risks include prior radiation or certain genetic factors.",
            next: "Small asymptomatic tumors may be monitored; otherwise surgery or radiotherapy is considered.",
        },
    ),
    (
        "pituitary",
        EducationEntry {
            what: "Usually benign growths near the base of the brain; some change hormones.",
            why: "May be hormone-secreting or non-functioning; often found on imaging.",
            next: "Care via endocrinology/neurosurgery: medicines, endoscopic surgery, and/or radiotherapy.",
        },
    ),
    (
        "no_tumor",
        EducationEntry {
            what: "No tumor features detected by the model.",
            why: "AI may miss subtle findings; imaging quality and other conditions matter.",
            next: "Use clinical judgment; if symptoms persist, seek medical evaluation.",
        },
    ),
];

const LUNG: [(&str, EducationEntry); 5] = [
    (
        "Bacterial Pneumonia",
        EducationEntry {
            what: "A lung infection caused by bacteria with fever, cough, breathlessness.",
            why: "Air sacs fill with inflammatory fluid; risks include age and chronic illness.",
            next: "Clinician may prescribe antibiotics; vaccines and timely care reduce complications.",
        },
    ),
    (
        "Corona Virus Disease",
        EducationEntry {
            what: "COVID-19 respiratory illness caused by SARS-CoV-2.",
            why: "Spreads via droplets/aerosols; higher risk with comorbidities.",
            next: "Testing and isolation guidance; antivirals for higher-risk patients per current practice.",
        },
    ),
    (
        "Normal",
        EducationEntry {
            what: "No clear abnormality detected by the model.",
            why: "‘Normal’ on AI doesn’t rule out early/subtle disease.",
            next: "Correlate with symptoms; follow up if concerns persist.",
        },
    ),
    (
        "Tuberculosis",
        EducationEntry {
            what: "Contagious lung infection from Mycobacterium tuberculosis.",
            why: "Airborne spread; reactivation risk rises with immune compromise.",
            next: "Needs confirmed testing and multi-drug therapy under public-health supervision.",
        },
    ),
    (
        "Viral Pneumonia",
        EducationEntry {
            what: "Lung infection from viruses such as influenza or RSV.",
            why: "Viruses inflame airways/air-sacs; severe in infants/older adults/comorbidity.",
            next: "Supportive care; specific antivirals depend on the virus and clinician judgment.",
        },
    ),
];

fn table(zone: Zone) -> &'static [(&'static str, EducationEntry)] {
    match zone {
        Zone::Brain => &BRAIN,
        Zone::Lung => &LUNG,
    }
}

/// Education keys of a zone, in declaration order.
pub fn keys(zone: Zone) -> impl Iterator<Item = &'static str> {
    table(zone).iter().map(|(k, _)| *k)
}

/// Exact-key lookup. Unmapped keys mean "no education available".
pub fn lookup(zone: Zone, key: &str) -> Option<&'static EducationEntry> {
    table(zone)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, entry)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_label_has_an_entry() {
        for zone in Zone::ALL {
            for label in zone.default_labels() {
                assert!(lookup(zone, &label).is_some(), "{zone}: {label}");
            }
        }
    }

    #[test]
    fn lookup_is_exact_and_zone_scoped() {
        assert!(lookup(Zone::Brain, "Glioma").is_none());
        assert!(lookup(Zone::Lung, "glioma").is_none());
        assert_eq!(keys(Zone::Lung).count(), 5);
    }
}
