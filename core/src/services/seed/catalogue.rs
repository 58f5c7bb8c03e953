use crate::domain::entities::listing::{Category, Condition};

pub(super) struct DemoListing {
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub category: Category,
    pub condition: Condition,
    pub image: &'static str,
}

pub(super) const DEMO_LISTINGS: [DemoListing; 10] = [
    DemoListing {
        name: "MacBook Air M2",
        description: "Brand new MacBook Air with M2 chip. 8GB RAM, 256GB SSD. Perfect for students and professionals.",
        price: 999.0,
        category: Category::Electronics,
        condition: Condition::New,
        image: "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=500",
    },
    DemoListing {
        name: "Vintage Leather Sofa",
        description: "Beautiful brown leather sofa in excellent condition. 3-seater, very comfortable.",
        price: 450.0,
        category: Category::Furniture,
        condition: Condition::Good,
        image: "https://images.unsplash.com/photo-1555041469-a586c61ea9bc?w=500",
    },
    DemoListing {
        name: "iPhone 14 Pro",
        description: "Like new iPhone 14 Pro, 128GB, Space Black. Includes original box and accessories.",
        price: 800.0,
        category: Category::Electronics,
        condition: Condition::LikeNew,
        image: "https://images.unsplash.com/photo-1592899677977-9c10ca588bbd?w=500",
    },
    DemoListing {
        name: "Mountain Bike",
        description: "Trek mountain bike, 21-speed, excellent for trails and city riding. Recently serviced.",
        price: 320.0,
        category: Category::Sports,
        condition: Condition::Good,
        image: "https://images.unsplash.com/photo-1544191696-15693072e1c4?w=500",
    },
    DemoListing {
        name: "Coffee Table",
        description: "Modern glass coffee table with wooden legs. Perfect centerpiece for living room.",
        price: 150.0,
        category: Category::Furniture,
        condition: Condition::Good,
        image: "https://images.unsplash.com/photo-1549497538-303791108f95?w=500",
    },
    DemoListing {
        name: "Gaming Chair",
        description: "Ergonomic gaming chair with RGB lighting. Excellent lumbar support, barely used.",
        price: 200.0,
        category: Category::Furniture,
        condition: Condition::LikeNew,
        image: "https://images.unsplash.com/photo-1541558869434-2840d308329a?w=500",
    },
    DemoListing {
        name: "Wireless Headphones",
        description: "Sony WH-1000XM4 noise cancelling headphones. Excellent sound quality.",
        price: 250.0,
        category: Category::Electronics,
        condition: Condition::Good,
        image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500",
    },
    DemoListing {
        name: "Designer Dress",
        description: "Beautiful evening dress, size M. Worn only once, perfect for special occasions.",
        price: 80.0,
        category: Category::Clothing,
        condition: Condition::LikeNew,
        image: "https://images.unsplash.com/photo-1595777457583-95e059d581b8?w=500",
    },
    DemoListing {
        name: "Kitchen Blender",
        description: "High-power Vitamix blender. Perfect for smoothies and food preparation.",
        price: 45.0,
        category: Category::HomeAndGarden,
        condition: Condition::Good,
        image: "https://images.unsplash.com/photo-1570197788417-0e82375c9371?w=500",
    },
    DemoListing {
        name: "Programming Books Set",
        description: "Collection of 5 programming books including Clean Code, Design Patterns, etc.",
        price: 60.0,
        category: Category::Books,
        condition: Condition::Good,
        image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=500",
    },
];
