pub struct Campus {
    pub name: &'static str,
    pub domain: &'static str,
    pub lat: f64,
    pub lng: f64,
}

pub struct SeedUser {
    pub email: &'static str,
    pub campus: &'static Campus,
    pub first: &'static str,
    pub last: &'static str,
    pub picture: &'static str,
    pub bio: &'static str,
    pub year: &'static str,
}

pub struct SeedPost {
    pub email: &'static str,
    pub university: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub looking_for: &'static str,
    pub category: &'static str,
    pub project_link: &'static str,
    pub stage: &'static str,
}

pub const CMU: Campus = Campus {
    name: "Carnegie Mellon University",
    domain: "cmu.edu",
    lat: 40.4433,
    lng: -79.944,
};

pub const PITT: Campus = Campus {
    name: "University of Pittsburgh",
    domain: "pitt.edu",
    lat: 40.444,
    lng: -79.9532,
};

pub const CAMPUSES: [&Campus; 2] = [&CMU, &PITT];

pub const USERS: [SeedUser; 5] = [
    SeedUser {
        email: "rachelwang@cmu.edu",
        campus: &CMU,
        first: "Rachel",
        last: "Wang",
        picture: "https://images.unsplash.com/photo-1494790108755-2616b612b786",
        bio: "CS major focusing on responsible AI.",
        year: "2026",
    },
    SeedUser {
        email: "jamesmitchell@cmu.edu",
        campus: &CMU,
        first: "James",
        last: "Mitchell",
        picture: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d",
        bio: "Robotics student building collaborative robots.",
        year: "2025",
    },
    SeedUser {
        email: "sophiachen@cmu.edu",
        campus: &CMU,
        first: "Sophia",
        last: "Chen",
        picture: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80",
        bio: "HCI designer building inclusive tools.",
        year: "2026",
    },
    SeedUser {
        email: "michaelrodriguez@pitt.edu",
        campus: &PITT,
        first: "Michael",
        last: "Rodriguez",
        picture: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d",
        bio: "Bioengineering student creating medical devices.",
        year: "2025",
    },
    SeedUser {
        email: "emilyzhang@pitt.edu",
        campus: &PITT,
        first: "Emily",
        last: "Zhang",
        picture: "https://images.unsplash.com/photo-1494790108755-2616b612b786",
        bio: "Environmental science student working on green cities.",
        year: "2026",
    },
];

pub const POSTS: [SeedPost; 5] = [
    SeedPost {
        email: "rachelwang@cmu.edu",
        university: "Carnegie Mellon University",
        title: "Ethical AI Framework",
        summary: "Responsible AI toolkit: bias detection, transparency tools, ethical guidelines.",
        looking_for: "AI researchers, ethicists, engineers",
        category: "Tech",
        project_link: "https://ethicalai.cmu.edu",
        stage: "prototype",
    },
    SeedPost {
        email: "jamesmitchell@cmu.edu",
        university: "Carnegie Mellon University",
        title: "Collaborative Robotics Lab",
        summary: "Next-gen cobots with advanced vision and haptics.",
        looking_for: "Robotics, CV, ME, safety",
        category: "Tech",
        project_link: "",
        stage: "development",
    },
    SeedPost {
        email: "sophiachen@cmu.edu",
        university: "Carnegie Mellon University",
        title: "Accessible Design Platform",
        summary: "Automated accessibility testing and inclusive design guidelines.",
        looking_for: "UX, a11y experts, FE devs",
        category: "Social Impact",
        project_link: "",
        stage: "idea",
    },
    SeedPost {
        email: "michaelrodriguez@pitt.edu",
        university: "University of Pittsburgh",
        title: "Community Health Monitor",
        summary: "Portable diagnostics for underserved communities.",
        looking_for: "Biomed, clinicians, mobile devs",
        category: "Health",
        project_link: "https://communityhealth.pitt.edu",
        stage: "beta",
    },
    SeedPost {
        email: "emilyzhang@pitt.edu",
        university: "University of Pittsburgh",
        title: "Green Infrastructure Network",
        summary: "Rain gardens, green roofs, permeable pavements for urban resilience.",
        looking_for: "Env engineers, planners, landscape architects",
        category: "Sustainability",
        project_link: "",
        stage: "planning",
    },
];
