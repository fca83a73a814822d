//! Canned generation data for the RXFLOW fallback generators.
//!
//! All data in this module is hardcoded and fictional. Nothing here is ever
//! mutated at runtime — the tables are module-level constants, immutable for
//! the process lifetime, shared freely across concurrent invocations.

// ── Anagram catalog ──────────────────────────────────────────────────────────

/// A canned anagram puzzle entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedAnagram {
    /// The answer word (a drug name).
    pub word: &'static str,
    /// A fixed scramble of `word`.
    pub scrambled: &'static str,
    /// A one-line clue shown to the student.
    pub clue: &'static str,
}

/// A topic category the matcher can resolve free-text topics onto.
#[derive(Debug, Clone, Copy)]
pub struct AnagramCategory {
    /// Canonical category name; an exact case-insensitive match of this
    /// string wins outright.
    pub name: &'static str,
    /// Keywords scored by substring match against the lowercased topic.
    pub keywords: &'static [&'static str],
    /// The canned puzzle list for this category.
    pub entries: &'static [CannedAnagram],
}

/// The category an unrecognized topic resolves to.
pub const DEFAULT_ANAGRAM_CATEGORY: &str = "antibiotics";

/// Every category the fallback generator knows about.
pub const ANAGRAM_CATEGORIES: &[AnagramCategory] = &[
    AnagramCategory {
        name: "antibiotics",
        keywords: &["antibiotic", "infection", "bacteria", "antimicrobial", "penicillin"],
        entries: &[
            CannedAnagram { word: "amoxicillin", scrambled: "mixallinoci", clue: "Broad-spectrum penicillin, first-line for otitis media" },
            CannedAnagram { word: "penicillin", scrambled: "nilpilceni", clue: "The original beta-lactam, discovered in 1928" },
            CannedAnagram { word: "azithromycin", scrambled: "mythzirconia", clue: "Macrolide taken as a five-day 'pack'" },
            CannedAnagram { word: "doxycycline", scrambled: "cyclonedixy", clue: "Tetracycline that causes photosensitivity" },
            CannedAnagram { word: "ciprofloxacin", scrambled: "profilicoxacn", clue: "Fluoroquinolone active against gram-negatives" },
            CannedAnagram { word: "vancomycin", scrambled: "cinnamycov", clue: "Glycopeptide reserved for resistant gram-positives" },
        ],
    },
    AnagramCategory {
        name: "cardiovascular drugs",
        keywords: &["cardio", "heart", "blood pressure", "hypertension", "cholesterol", "cardiovascular"],
        entries: &[
            CannedAnagram { word: "aspirin", scrambled: "spirina", clue: "Antiplatelet agent, 81 mg for prevention" },
            CannedAnagram { word: "warfarin", scrambled: "rainwarf", clue: "Vitamin K antagonist monitored by INR" },
            CannedAnagram { word: "lisinopril", scrambled: "pillirions", clue: "ACE inhibitor with a dry-cough side effect" },
            CannedAnagram { word: "metoprolol", scrambled: "lolotromep", clue: "Cardioselective beta blocker" },
            CannedAnagram { word: "amlodipine", scrambled: "melanopiid", clue: "Calcium channel blocker known for ankle edema" },
            CannedAnagram { word: "atorvastatin", scrambled: "vastarotanit", clue: "HMG-CoA reductase inhibitor taken at night" },
            CannedAnagram { word: "digoxin", scrambled: "xingoid", clue: "Cardiac glycoside with a narrow therapeutic index" },
        ],
    },
    AnagramCategory {
        name: "analgesics",
        keywords: &["pain", "analgesic", "opioid", "nsaid", "relief"],
        entries: &[
            CannedAnagram { word: "ibuprofen", scrambled: "funbioper", clue: "OTC NSAID, take with food" },
            CannedAnagram { word: "paracetamol", scrambled: "acetaparmol", clue: "Antipyretic with a 4 g daily ceiling" },
            CannedAnagram { word: "naproxen", scrambled: "xenorpan", clue: "Long-acting NSAID dosed twice daily" },
            CannedAnagram { word: "morphine", scrambled: "phonierm", clue: "The reference opioid agonist" },
            CannedAnagram { word: "tramadol", scrambled: "dolmatar", clue: "Atypical opioid with SNRI activity" },
            CannedAnagram { word: "codeine", scrambled: "encoide", clue: "Prodrug metabolized by CYP2D6" },
        ],
    },
    AnagramCategory {
        name: "diabetes medications",
        keywords: &["diabetes", "glucose", "insulin", "glycemic", "sugar"],
        entries: &[
            CannedAnagram { word: "metformin", scrambled: "informetm", clue: "First-line biguanide, held before contrast imaging" },
            CannedAnagram { word: "insulin", scrambled: "nilsuin", clue: "The hormone every type 1 regimen is built on" },
            CannedAnagram { word: "glipizide", scrambled: "zipgilide", clue: "Sulfonylurea taken before breakfast" },
            CannedAnagram { word: "empagliflozin", scrambled: "flamingozipel", clue: "SGLT2 inhibitor with cardiovascular benefit" },
            CannedAnagram { word: "sitagliptin", scrambled: "giantplitsi", clue: "DPP-4 inhibitor, weight neutral" },
            CannedAnagram { word: "glyburide", scrambled: "budgylrie", clue: "Sulfonylurea avoided in renal impairment" },
        ],
    },
];

// ── Clinical case library ────────────────────────────────────────────────────

/// A hand-authored case variant returned verbatim by the fallback generator.
#[derive(Debug, Clone, Copy)]
pub struct CaseVariant {
    pub title: &'static str,
    pub presentation: &'static str,
    pub history: &'static str,
    pub questions: &'static [&'static str],
}

/// The case variants available for one topic.
#[derive(Debug, Clone, Copy)]
pub struct CaseTopic {
    /// Canonical topic name, matched case-insensitively.
    pub name: &'static str,
    /// One to three variants; the fallback picks uniformly at random.
    pub variants: &'static [CaseVariant],
}

/// Every topic the case simulator's fallback covers.
///
/// All patients are fictional; no real identifiers or PHI are present.
pub const CASE_LIBRARY: &[CaseTopic] = &[
    CaseTopic {
        name: "hypertension",
        variants: &[
            CaseVariant {
                title: "Resistant Hypertension in a 58-Year-Old",
                presentation: "A 58-year-old presents for follow-up with blood pressure 162/98 mmHg \
                               despite adherence to lisinopril 40 mg and amlodipine 10 mg daily. \
                               They report occasional headaches and take ibuprofen most evenings for knee pain.",
                history: "Type 2 diabetes, osteoarthritis. No smoking. eGFR 68.",
                questions: &[
                    "Which over-the-counter agent in this history can raise blood pressure, and by what mechanism?",
                    "What third antihypertensive class is recommended at this point?",
                    "What laboratory values should be checked before and after the change?",
                ],
            },
            CaseVariant {
                title: "New ACE Inhibitor and a Persistent Cough",
                presentation: "A 49-year-old started lisinopril six weeks ago and now reports a dry, \
                               tickling cough that keeps them up at night. Blood pressure today is 128/82 mmHg.",
                history: "No asthma, no reflux. Non-smoker.",
                questions: &[
                    "What is the most likely cause of the cough?",
                    "Which drug class maintains similar benefits without this adverse effect?",
                    "Should therapy be stopped abruptly or cross-titrated?",
                ],
            },
        ],
    },
    CaseTopic {
        name: "diabetes",
        variants: &[
            CaseVariant {
                title: "Metformin and an Upcoming Contrast Study",
                presentation: "A 64-year-old on metformin 1000 mg twice daily is scheduled for a CT \
                               angiogram with iodinated contrast next week. Their last eGFR was 52.",
                history: "Type 2 diabetes for 11 years, hypertension, prior stent.",
                questions: &[
                    "Why is metformin a concern around iodinated contrast?",
                    "When should the drug be held and when may it be resumed?",
                    "What renal check is required before resuming?",
                ],
            },
            CaseVariant {
                title: "Hypoglycemia on a Sulfonylurea",
                presentation: "A 71-year-old on glyburide reports two episodes of sweating, tremor, \
                               and confusion before lunch this week, both resolving with juice.",
                history: "Creatinine rising over the past year; lives alone.",
                questions: &[
                    "Why does renal impairment make glyburide particularly hazardous?",
                    "Which alternative agents carry lower hypoglycemia risk?",
                    "What counseling points matter most for a patient living alone?",
                ],
            },
            CaseVariant {
                title: "Starting an SGLT2 Inhibitor",
                presentation: "A 55-year-old with type 2 diabetes and heart failure with reduced \
                               ejection fraction is started on empagliflozin 10 mg daily.",
                history: "On metformin and sacubitril/valsartan. A1c 7.9%.",
                questions: &[
                    "Beyond glucose lowering, what benefit does this class provide here?",
                    "What genitourinary adverse effect should the patient be warned about?",
                    "What sick-day guidance applies to this medication?",
                ],
            },
        ],
    },
    CaseTopic {
        name: "asthma",
        variants: &[
            CaseVariant {
                title: "Overusing the Rescue Inhaler",
                presentation: "A 23-year-old reports using their salbutamol inhaler eight to ten \
                               times per week, including twice at night, while playing indoor soccer.",
                history: "Asthma since childhood. No controller therapy at present.",
                questions: &[
                    "What does this reliever-use pattern indicate about asthma control?",
                    "What controller therapy step is indicated?",
                    "How would you verify inhaler technique?",
                ],
            },
            CaseVariant {
                title: "Beta Blocker in an Asthmatic Patient",
                presentation: "A 67-year-old with asthma is prescribed propranolol for essential \
                               tremor and presents two days later with wheezing and chest tightness.",
                history: "Moderate persistent asthma, well controlled on inhaled corticosteroid.",
                questions: &[
                    "Why is a non-selective beta blocker problematic in asthma?",
                    "What alternative options exist for the tremor?",
                    "If a beta blocker were unavoidable, which property would you look for?",
                ],
            },
        ],
    },
];

/// Last-resort case used when a library topic carries no variants. Library
/// topics are authored with 1–3 variants, so this only surfaces if an empty
/// entry slips through review.
pub const GENERIC_CASE: CaseVariant = CaseVariant {
    title: "Routine Medication Review",
    presentation: "A 60-year-old presents for an annual medication review. They bring a bag of \
                   seven prescriptions from three different prescribers and are unsure why they \
                   take several of them.",
    history: "Hypertension, type 2 diabetes, osteoarthritis.",
    questions: &[
        "How would you structure a systematic review of this medication list?",
        "What duplication or interaction checks take priority?",
        "Which medications warrant a deprescribing conversation?",
    ],
};

/// Static feedback text the grading mode returns regardless of answers.
pub const CANNED_FEEDBACK: &str =
    "Good work engaging with the case. Review each question against the primary \
     literature and current guidelines: focus on the mechanism behind every drug \
     choice, the monitoring each change requires, and the counseling points a \
     patient would need to hear in plain language.";

/// Key points attached to canned feedback.
pub const CANNED_FEEDBACK_POINTS: &[&str] = &[
    "Tie every recommendation to a mechanism, not just a guideline line number.",
    "State the monitoring plan (labs, vitals, follow-up interval) for each change.",
    "Close with patient-facing counseling in plain language.",
];

// ── Allergy boilerplate ──────────────────────────────────────────────────────

/// Per-tier static text blocks for the allergy fallback.
#[derive(Debug, Clone, Copy)]
pub struct AllergyBoilerplate {
    pub reasoning: &'static str,
    pub immediate_steps: &'static [&'static str],
    pub when_to_seek_help: &'static str,
}

/// Boilerplate for the low risk tier.
pub const ALLERGY_LOW: AllergyBoilerplate = AllergyBoilerplate {
    reasoning: "Reported symptoms are mild and the ingredient profile shows no flagged agents; \
                the pattern is consistent with low allergy risk.",
    immediate_steps: &[
        "Monitor symptoms for the next 24 hours.",
        "Keep a note of foods, medications, and products used today.",
    ],
    when_to_seek_help: "Contact a pharmacist or physician if symptoms persist beyond 48 hours or worsen.",
};

/// Boilerplate for the medium risk tier.
pub const ALLERGY_MEDIUM: AllergyBoilerplate = AllergyBoilerplate {
    reasoning: "Moderate symptoms suggest a possible allergic reaction that warrants attention, \
                though no emergency indicators are present.",
    immediate_steps: &[
        "Stop using the suspected product or medication.",
        "An oral antihistamine may relieve symptoms; follow package dosing.",
        "Monitor closely for spreading rash, swelling, or breathing changes.",
    ],
    when_to_seek_help: "Seek medical advice today if symptoms do not begin improving within a few hours.",
};

/// Boilerplate for the high risk tier.
pub const ALLERGY_HIGH: AllergyBoilerplate = AllergyBoilerplate {
    reasoning: "Severe symptoms or a flagged ingredient indicate a significant allergic reaction risk; \
                this combination should not be managed by waiting.",
    immediate_steps: &[
        "Stop the suspected product or medication immediately.",
        "Do not take another dose while awaiting advice.",
        "Arrange urgent medical review today.",
    ],
    when_to_seek_help: "Seek urgent care now; call emergency services if swelling of the face or throat, \
                        widespread hives, or any breathing difficulty develops.",
};

/// Boilerplate for the emergency risk tier.
pub const ALLERGY_EMERGENCY: AllergyBoilerplate = AllergyBoilerplate {
    reasoning: "The reported picture matches anaphylaxis or another emergency-grade reaction.",
    immediate_steps: &[
        "Call emergency services now.",
        "Use an epinephrine auto-injector immediately if one is available.",
        "Lie flat with legs raised unless breathing is easier sitting up; do not stand suddenly.",
    ],
    when_to_seek_help: "This is an emergency — do not wait. Call emergency services immediately.",
};

/// Generic allergen list used when the caller supplied no flagged ingredients.
pub const COMMON_ALLERGENS: &[&str] = &["penicillins", "sulfonamides", "NSAIDs", "preservatives (parabens)"];

/// Standard disclaimer attached to every fallback assessment.
pub const ALLERGY_DISCLAIMER: &str =
    "This automated assessment is informational and is not a medical diagnosis. \
     Always confirm with a pharmacist or physician.";
