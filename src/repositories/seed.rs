//! Mock records the in-memory repositories start from.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    Activity, ActivityType, AmountPoint, Availability, ClientStats, Conversation,
    DashboardSnapshot, Education, Faq, LastMessage, Message, MessageSender, Order, OrderStatus,
    PackageTier, Participant, PendingReview, Profile, ProfileService, ProfileSettings,
    ProfileStats, ProfileVisibility, ProviderStats, Recipient, Review, Service, ServicePackage,
    TimelineEvent, WorkEntry, CURRENT_USER_ID, CURRENT_USER_NAME,
};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn service(
    id: &str,
    title: &str,
    category: &str,
    subcategory: &str,
    price: Decimal,
    rating: Decimal,
    review_count: u32,
    seller_name: &str,
    seller_level: &str,
    delivery_time: &str,
    location: &str,
) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        price,
        rating,
        review_count,
        seller_name: seller_name.to_string(),
        seller_level: Some(seller_level.to_string()),
        delivery_time: delivery_time.to_string(),
        location: location.to_string(),
        image: None,
        tags: Vec::new(),
        revisions: None,
        created_at: at(2023, 11, 1, 0, 0),
        packages: Vec::new(),
        faqs: Vec::new(),
    }
}

fn package(
    tier: PackageTier,
    description: &str,
    price: Decimal,
    delivery_time: &str,
    revisions: Option<u32>,
    features: &[&str],
) -> ServicePackage {
    let name = match tier {
        PackageTier::Basic => "Basic",
        PackageTier::Standard => "Standard",
        PackageTier::Premium => "Premium",
    };
    ServicePackage {
        tier,
        name: name.to_string(),
        description: description.to_string(),
        price,
        delivery_time: delivery_time.to_string(),
        revisions,
        features: strings(features),
    }
}

fn faq(question: &str, answer: &str) -> Faq {
    Faq {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

/// Tiers and questions shown on the website development listing
fn website_packages() -> (Vec<ServicePackage>, Vec<Faq>) {
    let packages = vec![
        package(
            PackageTier::Basic,
            "Simple landing page with up to 3 sections",
            dec!(300),
            "7 days",
            Some(2),
            &["1 page", "Responsive design", "Source code", "Content upload"],
        ),
        package(
            PackageTier::Standard,
            "Multi-page website with up to 5 pages",
            dec!(600),
            "10 days",
            Some(3),
            &[
                "Up to 5 pages",
                "Responsive design",
                "Source code",
                "Content upload",
                "Contact form",
                "Basic SEO",
            ],
        ),
        package(
            PackageTier::Premium,
            "Complete website with CMS integration",
            dec!(1200),
            "21 days",
            None,
            &[
                "Up to 10 pages",
                "Responsive design",
                "Source code",
                "Content upload",
                "Contact form",
                "Advanced SEO",
                "CMS integration",
                "E-commerce functionality",
                "3 months support",
            ],
        ),
    ];

    let faqs = vec![
        faq(
            "Do you provide the source code?",
            "Yes, all packages include full source code of your website which you own completely after delivery.",
        ),
        faq(
            "Can I request modifications after the project is delivered?",
            "Yes, I offer revisions based on your package. Additional revisions beyond the included amount can be purchased.",
        ),
        faq(
            "Do you provide hosting services?",
            "I can help set up hosting, but hosting costs are not included in the packages. I recommend services like Vercel, Netlify, or AWS depending on your needs.",
        ),
        faq(
            "How do we communicate during the project?",
            "We can communicate via the platform messaging system, email, or schedule calls if needed for complex requirements.",
        ),
        faq(
            "Can you integrate payment gateways?",
            "Yes, I can integrate payment gateways like Stripe, PayPal, or others depending on your requirements. This is included in the Premium package.",
        ),
    ];

    (packages, faqs)
}

/// The six listings of the advanced search page
pub fn advanced_search_services() -> Vec<Service> {
    let (packages, faqs) = website_packages();
    vec![
        Service {
            packages,
            faqs,
            ..service(
                "service-1",
                "Professional Website Development",
                "development",
                "web",
                dec!(500),
                dec!(4.9),
                124,
                "John Doe",
                "Top Rated",
                "7 days",
                "New York, USA",
            )
        },
        service(
            "service-2",
            "Creative Logo Design",
            "design",
            "logo",
            dec!(150),
            dec!(4.8),
            89,
            "Sarah Johnson",
            "Rising Talent",
            "3 days",
            "Los Angeles, USA",
        ),
        service(
            "service-3",
            "SEO Optimization Package",
            "marketing",
            "seo",
            dec!(300),
            dec!(4.7),
            56,
            "Michael Brown",
            "Level 2",
            "10 days",
            "Chicago, USA",
        ),
        service(
            "service-4",
            "Professional Content Writing",
            "writing",
            "articles",
            dec!(80),
            dec!(4.5),
            42,
            "Emma Wilson",
            "Level 1",
            "2 days",
            "Online",
        ),
        service(
            "service-5",
            "Kitchen Remodeling",
            "construction",
            "renovation",
            dec!(3000),
            dec!(4.9),
            35,
            "Robert Garcia",
            "Top Rated",
            "30 days",
            "Miami, USA",
        ),
        service(
            "service-6",
            "HVAC Maintenance and Repair",
            "maintenance",
            "hvac",
            dec!(120),
            dec!(4.7),
            52,
            "David Miller",
            "Level 2",
            "1 day",
            "Denver, USA",
        ),
    ]
}

/// Full catalogue: the advanced search listings plus the extra basic search ones
pub fn services() -> Vec<Service> {
    let mut all = advanced_search_services();
    all.push(service(
        "service-7",
        "Mobile App UI Design",
        "design",
        "ui-ux",
        dec!(450),
        dec!(4.6),
        38,
        "Jessica Lee",
        "Level 2",
        "5 days",
        "Online",
    ));
    all.push(service(
        "service-8",
        "Social Media Marketing Campaign",
        "marketing",
        "social-media",
        dec!(250),
        dec!(4.5),
        47,
        "Thomas Wright",
        "Level 1",
        "14 days",
        "Online",
    ));
    all
}

fn event(date: DateTime<Utc>, event: &str, description: &str) -> TimelineEvent {
    TimelineEvent {
        date,
        event: event.to_string(),
        description: description.to_string(),
    }
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: "order-123".to_string(),
            service_id: "srvc-789".to_string(),
            service_name: "Full Website Development".to_string(),
            service_description: Some(
                "Complete website development including design, frontend and backend implementation, responsive layouts, and basic SEO setup."
                    .to_string(),
            ),
            seller_id: "user-456".to_string(),
            seller_name: "Alex Johnson".to_string(),
            price: dec!(1200),
            status: OrderStatus::InProgress,
            progress: Some(40),
            due_date: at(2023, 12, 15, 0, 0),
            created_at: at(2023, 11, 20, 0, 0),
            completed_at: None,
            cancelled_at: None,
            cancel_reason: None,
            has_review: false,
            review_id: None,
            messages: 3,
            timeline: vec![
                event(
                    at(2023, 11, 20, 10, 30),
                    "Order Placed",
                    "You placed an order for Full Website Development",
                ),
                event(
                    at(2023, 11, 20, 11, 45),
                    "Order Accepted",
                    "Alex Johnson accepted your order",
                ),
                event(
                    at(2023, 11, 25, 14, 20),
                    "Requirements Confirmed",
                    "Project requirements were confirmed and work started",
                ),
                event(
                    at(2023, 11, 30, 9, 15),
                    "First Draft Delivered",
                    "Initial design mockups were delivered for review",
                ),
            ],
            deliverables: strings(&[
                "Responsive website with 5 pages",
                "Custom contact form with email notifications",
                "Mobile-friendly design",
                "Basic SEO optimization",
                "Integration with Google Analytics",
            ]),
            revisions: Some(2),
            additional_info: Some(
                "Client requested extra attention to mobile responsiveness and loading speed."
                    .to_string(),
            ),
        },
        Order {
            id: "order-124".to_string(),
            service_id: "srvc-790".to_string(),
            service_name: "Logo Design Package".to_string(),
            service_description: None,
            seller_id: "user-457".to_string(),
            seller_name: "Sophia Lee".to_string(),
            price: dec!(300),
            status: OrderStatus::AwaitingDelivery,
            progress: Some(85),
            due_date: at(2023, 12, 5, 0, 0),
            created_at: at(2023, 11, 25, 0, 0),
            completed_at: None,
            cancelled_at: None,
            cancel_reason: None,
            has_review: false,
            review_id: None,
            messages: 5,
            timeline: vec![event(
                at(2023, 11, 25, 9, 0),
                "Order Placed",
                "You placed an order for Logo Design Package",
            )],
            deliverables: Vec::new(),
            revisions: None,
            additional_info: None,
        },
        Order {
            id: "order-120".to_string(),
            service_id: "srvc-780".to_string(),
            service_name: "SEO Optimization".to_string(),
            service_description: Some(
                "Complete SEO audit and optimization to improve search engine rankings, including keyword research, on-page optimization, and technical SEO fixes."
                    .to_string(),
            ),
            seller_id: "user-450".to_string(),
            seller_name: "James Wilson".to_string(),
            price: dec!(450),
            status: OrderStatus::Completed,
            progress: None,
            due_date: at(2023, 11, 10, 0, 0),
            created_at: at(2023, 10, 25, 0, 0),
            completed_at: Some(at(2023, 11, 8, 0, 0)),
            cancelled_at: None,
            cancel_reason: None,
            has_review: true,
            review_id: Some("rev-123".to_string()),
            messages: 0,
            timeline: vec![
                event(
                    at(2023, 10, 25, 14, 30),
                    "Order Placed",
                    "You placed an order for SEO Optimization",
                ),
                event(
                    at(2023, 10, 25, 16, 20),
                    "Order Accepted",
                    "James Wilson accepted your order",
                ),
                event(
                    at(2023, 10, 30, 11, 45),
                    "Initial Audit Completed",
                    "Initial SEO audit completed and shared for review",
                ),
                event(
                    at(2023, 11, 5, 9, 30),
                    "Optimizations Applied",
                    "On-page and technical SEO optimizations applied",
                ),
                event(
                    at(2023, 11, 8, 15, 10),
                    "Order Completed",
                    "All deliverables submitted and order marked as complete",
                ),
                event(
                    at(2023, 11, 10, 10, 25),
                    "Review Submitted",
                    "You left a 5-star review",
                ),
            ],
            deliverables: strings(&[
                "Comprehensive SEO audit report",
                "Keyword research and strategy document",
                "On-page optimization for 10 key pages",
                "Technical SEO improvements",
                "Monthly performance report template",
            ]),
            revisions: Some(1),
            additional_info: Some(
                "Focus on improving local search visibility and Google Maps ranking.".to_string(),
            ),
        },
        Order {
            id: "order-121".to_string(),
            service_id: "srvc-781".to_string(),
            service_name: "Mobile App UI Design".to_string(),
            service_description: None,
            seller_id: "user-451".to_string(),
            seller_name: "Emma Garcia".to_string(),
            price: dec!(750),
            status: OrderStatus::Completed,
            progress: None,
            due_date: at(2023, 11, 1, 0, 0),
            created_at: at(2023, 10, 15, 0, 0),
            completed_at: Some(at(2023, 10, 29, 0, 0)),
            cancelled_at: None,
            cancel_reason: None,
            has_review: false,
            review_id: None,
            messages: 0,
            timeline: Vec::new(),
            deliverables: Vec::new(),
            revisions: None,
            additional_info: None,
        },
        Order {
            id: "order-115".to_string(),
            service_id: "srvc-775".to_string(),
            service_name: "Content Writing".to_string(),
            service_description: Some(
                "Professional content writing services for blogs, websites, and marketing materials. SEO-optimized and engaging content tailored to your target audience."
                    .to_string(),
            ),
            seller_id: "user-445".to_string(),
            seller_name: "David Brown".to_string(),
            price: dec!(150),
            status: OrderStatus::Cancelled,
            progress: None,
            due_date: at(2023, 10, 20, 0, 0),
            created_at: at(2023, 10, 5, 0, 0),
            completed_at: None,
            cancelled_at: Some(at(2023, 10, 10, 0, 0)),
            cancel_reason: Some("Changed requirements".to_string()),
            has_review: false,
            review_id: None,
            messages: 0,
            timeline: vec![
                event(
                    at(2023, 10, 5, 16, 45),
                    "Order Placed",
                    "You placed an order for Content Writing",
                ),
                event(
                    at(2023, 10, 6, 9, 30),
                    "Order Accepted",
                    "David Brown accepted your order",
                ),
                event(
                    at(2023, 10, 10, 14, 15),
                    "Order Cancelled",
                    "You cancelled the order: Changed requirements",
                ),
            ],
            deliverables: strings(&[
                "5 blog posts (1000 words each)",
                "SEO optimization for target keywords",
                "Meta descriptions and title tags",
                "One round of revisions",
            ]),
            revisions: Some(1),
            additional_info: Some(
                "Changed project direction and will need different content approach.".to_string(),
            ),
        },
    ]
}

fn conversation(
    id: &str,
    participant_id: &str,
    name: &str,
    online: bool,
    text: &str,
    timestamp: DateTime<Utc>,
    unread_count: u32,
) -> Conversation {
    Conversation {
        id: id.to_string(),
        participant: Participant {
            id: participant_id.to_string(),
            name: name.to_string(),
            online,
        },
        last_message: LastMessage {
            text: text.to_string(),
            timestamp,
            is_read: unread_count == 0,
        },
        unread_count,
    }
}

/// Inbox as it looks at `now`
pub fn conversations(now: DateTime<Utc>) -> Vec<Conversation> {
    vec![
        conversation(
            "conv-1",
            "user-1",
            "Sarah Johnson",
            true,
            "I just reviewed your proposal and I think it looks great! When can we schedule a call to discuss further?",
            now - Duration::minutes(25),
            2,
        ),
        conversation(
            "conv-2",
            "user-2",
            "Michael Brown",
            false,
            "Thanks for the update. The designs are looking great. I have a few minor changes to suggest.",
            now - Duration::hours(3),
            0,
        ),
        conversation(
            "conv-3",
            "user-3",
            "Emily Wilson",
            true,
            "Hello! I'm interested in your web development service. Could you provide more details about your process and timeline?",
            now - Duration::days(1),
            0,
        ),
        conversation(
            "conv-4",
            "user-4",
            "David Miller",
            false,
            "The project has been completed successfully. I've just sent the final files. Please let me know if you need any adjustments.",
            now - Duration::days(2),
            0,
        ),
        conversation(
            "conv-5",
            "user-5",
            "Jessica Lee",
            true,
            "I've checked the revisions you made and everything looks perfect now. Thank you for your attention to detail!",
            now - Duration::days(3),
            0,
        ),
    ]
}

const THREAD_SCRIPT: [(bool, u32, u32, &str); 7] = [
    (true, 10, 30, "Hi there! Thanks for reaching out about the project."),
    (false, 10, 45, "Hello! I was looking at your profile and I think your skills would be perfect for our project."),
    (true, 11, 15, "I'd be happy to discuss it further. Could you provide more details about what you're looking for?"),
    (false, 11, 30, "We need a complete website redesign for our e-commerce store. The current site is outdated and not mobile-friendly. We'd like something modern, responsive, and optimized for conversions."),
    (true, 13, 0, "That sounds like a project I can definitely help with. I have extensive experience with e-commerce sites. What's your timeline and budget for this project?"),
    (false, 14, 30, "We'd like to launch the new site in about 2 months. Our budget is around $5,000-$7,000. Does that work for you?"),
    (true, 15, 0, "That timeline and budget are reasonable for what you're looking for. I'll prepare a detailed proposal with my approach, deliverables, and timeline. I should have it ready for you by tomorrow."),
];

/// Message history of `conversation`, ending with its last message
pub fn conversation_messages(conversation: &Conversation, now: DateTime<Utc>) -> Vec<Message> {
    let yesterday = (now - Duration::days(1)).date_naive();
    let participant = MessageSender {
        id: conversation.participant.id.clone(),
        name: conversation.participant.name.clone(),
    };
    let current_user = MessageSender {
        id: CURRENT_USER_ID.to_string(),
        name: CURRENT_USER_NAME.to_string(),
    };

    let mut messages: Vec<Message> = THREAD_SCRIPT
        .iter()
        .enumerate()
        .map(|(index, (from_me, hour, minute, text))| Message {
            id: format!("msg-{}-{}", conversation.id, index + 1),
            conversation_id: conversation.id.clone(),
            sender: if *from_me {
                current_user.clone()
            } else {
                participant.clone()
            },
            text: text.to_string(),
            timestamp: yesterday
                .and_hms_opt(*hour, *minute, 0)
                .map(|naive| Utc.from_utc_datetime(&naive))
                .unwrap_or(now),
            is_read: true,
        })
        .collect();

    messages.push(Message {
        id: format!("msg-{}-{}", conversation.id, THREAD_SCRIPT.len() + 1),
        conversation_id: conversation.id.clone(),
        sender: participant,
        text: conversation.last_message.text.clone(),
        timestamp: conversation.last_message.timestamp,
        is_read: conversation.last_message.is_read,
    });

    messages
}

pub fn recipients() -> Vec<Recipient> {
    [
        ("101", "John Doe", "Full Stack Developer", true),
        ("102", "Jane Smith", "UX/UI Designer", false),
        ("103", "Robert Johnson", "DevOps Engineer", true),
    ]
    .into_iter()
    .map(|(id, name, title, online)| Recipient {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        online,
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn review(
    id: &str,
    service_id: &str,
    service_name: &str,
    client: (&str, &str),
    seller: (&str, &str),
    rating: u8,
    comment: &str,
    date: DateTime<Utc>,
) -> Review {
    Review {
        id: id.to_string(),
        order_id: None,
        service_id: service_id.to_string(),
        service_name: service_name.to_string(),
        client_id: client.0.to_string(),
        client_name: client.1.to_string(),
        seller_id: seller.0.to_string(),
        seller_name: seller.1.to_string(),
        rating,
        comment: comment.to_string(),
        date,
        anonymous: false,
    }
}

/// Reviews clients left on the signed-in seller's services
pub fn received_reviews() -> Vec<Review> {
    let me = (CURRENT_USER_ID, CURRENT_USER_NAME);
    vec![
        review(
            "r1",
            "srvc1",
            "Professional Logo Design",
            ("client-101", "Sarah Johnson"),
            me,
            5,
            "Alex is a genius! The logo design process was smooth and professional from start to finish. He understood my brand vision perfectly and delivered exactly what I was looking for. Highly recommend!",
            at(2023, 11, 12, 14, 30),
        ),
        review(
            "r2",
            "srvc2",
            "Brand Identity Package",
            ("client-102", "Michael Chen"),
            me,
            4,
            "Great work on my brand identity package. Alex was professional, responsive, and delivered high-quality work. The only reason I'm not giving 5 stars is because I had to request some minor revisions, but he handled them quickly.",
            at(2023, 10, 28, 9, 15),
        ),
        review(
            "r3",
            "srvc1",
            "Professional Logo Design",
            ("client-103", "Emma Wilson"),
            me,
            5,
            "Working with Alex was amazing! He created a stunning logo that perfectly captures my brand's essence. His communication was excellent throughout the process. Will definitely work with him again for future design needs.",
            at(2023, 9, 15, 16, 45),
        ),
    ]
}

/// Reviews the signed-in client left for sellers
pub fn given_reviews() -> Vec<Review> {
    let me = (CURRENT_USER_ID, CURRENT_USER_NAME);
    vec![
        review(
            "g1",
            "srvc345",
            "Website Development",
            me,
            ("seller-201", "David Rodriguez"),
            5,
            "David built an exceptional website for my business. His coding skills are top-notch, and he was very accommodating with my change requests. The website loads quickly and looks beautiful on all devices.",
            at(2023, 10, 5, 11, 20),
        ),
        review(
            "g2",
            "srvc567",
            "SEO Optimization",
            me,
            ("seller-202", "Olivia Parker"),
            3,
            "Olivia's SEO service was okay, but I expected more detailed reporting and better results within the timeframe. Communication was good, but I think the strategy could have been more tailored to my specific industry.",
            at(2023, 8, 22, 13, 10),
        ),
    ]
}

pub fn pending_reviews() -> Vec<PendingReview> {
    vec![PendingReview {
        id: "p1".to_string(),
        order_id: "ord123".to_string(),
        service_id: "srvc789".to_string(),
        service_name: "Social Media Strategy".to_string(),
        seller_id: "user901".to_string(),
        seller_name: "James Thompson".to_string(),
        completed_date: at(2023, 11, 5, 10, 0),
    }]
}

pub fn profiles() -> Vec<Profile> {
    vec![Profile {
        id: "john-smith".to_string(),
        name: "John Smith".to_string(),
        title: "Full Stack Developer & UI/UX Designer".to_string(),
        location: "San Francisco, CA".to_string(),
        member_since: "June 2018".to_string(),
        last_active: "2 hours ago".to_string(),
        languages: strings(&["English (Native)", "Spanish (Fluent)", "French (Basic)"]),
        skills: strings(&[
            "React",
            "Next.js",
            "TypeScript",
            "Node.js",
            "Express",
            "MongoDB",
            "PostgreSQL",
            "GraphQL",
            "REST API",
            "UI/UX Design",
            "Figma",
            "Tailwind CSS",
            "Responsive Design",
            "AWS",
            "Firebase",
        ]),
        about: "I'm a full-stack developer with 5+ years of experience building modern web applications. I specialize in React, Next.js, and Node.js, with a strong focus on creating intuitive user interfaces and responsive designs."
            .to_string(),
        education: vec![Education {
            institution: "University of California, Berkeley".to_string(),
            degree: "Bachelor of Science in Computer Science".to_string(),
            years: "2014 - 2018".to_string(),
        }],
        work_history: vec![
            WorkEntry {
                company: "TechInnovate Solutions".to_string(),
                position: "Senior Full Stack Developer".to_string(),
                years: "2020 - Present".to_string(),
                description: "Lead developer for client projects, responsible for architecture decisions and implementing core features.".to_string(),
            },
            WorkEntry {
                company: "WebWorks Digital".to_string(),
                position: "Front-end Developer".to_string(),
                years: "2018 - 2020".to_string(),
                description: "Developed responsive web applications using React and collaborated with designers and back-end developers.".to_string(),
            },
        ],
        stats: ProfileStats {
            completed_projects: 132,
            on_time_delivery: 98,
            on_budget: 100,
            repeat_clients: 85,
            rating: dec!(4.9),
            total_reviews: 97,
        },
        services: vec![
            ProfileService {
                id: "service-1".to_string(),
                title: "Professional Website Development with React, Next.js and Tailwind CSS".to_string(),
                description: "I will create a modern, responsive website with the latest technologies to ensure fast performance and great user experience.".to_string(),
                price: dec!(600),
                rating: dec!(4.9),
                review_count: 43,
            },
            ProfileService {
                id: "service-2".to_string(),
                title: "Custom Web Application Development".to_string(),
                description: "I will develop a tailored web application to meet your specific business needs with secure authentication and data management.".to_string(),
                price: dec!(1500),
                rating: dec!(5.0),
                review_count: 21,
            },
            ProfileService {
                id: "service-3".to_string(),
                title: "UI/UX Design for Web and Mobile Applications".to_string(),
                description: "I will create intuitive, user-friendly designs for your application with a focus on usability, accessibility, and modern aesthetics.".to_string(),
                price: dec!(800),
                rating: dec!(4.8),
                review_count: 33,
            },
        ],
    }]
}

fn amounts(points: &[(u32, Decimal)]) -> Vec<AmountPoint> {
    points
        .iter()
        .map(|(day, amount)| AmountPoint {
            date: date(2023, 11, *day),
            amount: *amount,
        })
        .collect()
}

fn activity(
    id: &str,
    activity_type: ActivityType,
    content: &str,
    timestamp: DateTime<Utc>,
    link: &str,
) -> Activity {
    Activity {
        id: id.to_string(),
        activity_type,
        content: content.to_string(),
        timestamp,
        link: link.to_string(),
    }
}

pub fn dashboard() -> DashboardSnapshot {
    DashboardSnapshot {
        provider: ProviderStats {
            balance: dec!(1250.75),
            active_orders: 3,
            completed_orders: 28,
            total_earnings: dec!(4500),
            pending_reviews: 2,
            average_rating: dec!(4.8),
            review_count: 25,
            profile_views: 124,
            response_rate: 98,
            recent_income: amounts(&[
                (1, dec!(150)),
                (8, dec!(300)),
                (15, dec!(200)),
                (22, dec!(450)),
                (29, dec!(150)),
            ]),
        },
        client: ClientStats {
            active_orders: 2,
            completed_orders: 15,
            total_spent: dec!(3600),
            pending_reviews: 1,
            favorite_providers: 5,
            saved_services: 8,
            recent_spending: amounts(&[
                (1, dec!(100)),
                (8, dec!(250)),
                (15, dec!(150)),
                (22, dec!(350)),
                (29, dec!(200)),
            ]),
        },
        activity: vec![
            activity(
                "act-123",
                ActivityType::OrderProgress,
                "Your order \"Full Website Development\" is 40% complete",
                at(2023, 12, 5, 14, 30),
                "/orders/order-123",
            ),
            activity(
                "act-122",
                ActivityType::Message,
                "You received a new message from Alex Johnson",
                at(2023, 12, 4, 11, 15),
                "/messages?recipient=user-456",
            ),
            activity(
                "act-121",
                ActivityType::Review,
                "James Wilson left you a 5-star review",
                at(2023, 12, 3, 16, 45),
                "/reviews/rev-789",
            ),
            activity(
                "act-120",
                ActivityType::OrderCompleted,
                "Your order \"SEO Optimization\" was completed",
                at(2023, 12, 2, 9, 20),
                "/orders/order-120",
            ),
            activity(
                "act-119",
                ActivityType::Payment,
                "You received a payment of $450 for \"Logo Design Package\"",
                at(2023, 12, 1, 13, 10),
                "/orders/order-124",
            ),
        ],
    }
}

/// Settings form of the signed-in member
pub fn profile_settings() -> ProfileSettings {
    ProfileSettings {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        phone: "(555) 123-4567".to_string(),
        title: "Full Stack Developer".to_string(),
        description: "Experienced full stack developer with over 10 years of experience building web and mobile applications. Specialized in JavaScript, React, and Node.js."
            .to_string(),
        skills: strings(&["javascript", "react", "nodejs", "typescript"]),
        hourly_rate: Some(dec!(45)),
        availability: Availability::Limited,
        location: "New York, USA".to_string(),
        travel_distance: Some(25),
        profile_visibility: ProfileVisibility::Public,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Validate;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let service_ids: HashSet<_> = services().into_iter().map(|s| s.id).collect();
        assert_eq!(service_ids.len(), 8);

        let order_ids: HashSet<_> = orders().into_iter().map(|o| o.id).collect();
        assert_eq!(order_ids.len(), 5);
    }

    #[test]
    fn test_thread_ends_with_last_message() {
        let now = Utc::now();
        let inbox = conversations(now);
        let messages = conversation_messages(&inbox[0], now);

        assert_eq!(messages.len(), 8);
        assert_eq!(messages[0].id, "msg-conv-1-1");
        assert_eq!(messages[0].sender.id, CURRENT_USER_ID);
        assert_eq!(messages[1].sender.name, "Sarah Johnson");
        assert_eq!(messages[7].text, inbox[0].last_message.text);
        assert!(!messages[7].is_read);
        assert!(messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_packages_are_ordered_by_tier_and_price() {
        let services = services();
        let website = &services[0];

        assert_eq!(website.packages.len(), 3);
        assert_eq!(website.faqs.len(), 5);
        assert!(website
            .packages
            .windows(2)
            .all(|w| w[0].tier < w[1].tier && w[0].price <= w[1].price));
        assert_eq!(
            website.package(PackageTier::Premium).map(|p| p.revisions),
            Some(None)
        );
        assert_eq!(
            website.default_package().map(|p| p.price),
            Some(dec!(600))
        );
        assert!(services[1].default_package().is_none());
    }

    #[test]
    fn test_seeded_settings_are_valid() {
        assert!(profile_settings().validate().is_ok());
    }
}
